//! Page navigation and sidebar state.
//!
//! Thin on purpose: the park-on-leave and finish-lands-on-summary rules live
//! in the session controller, which drives this through explicit calls.

use crate::types::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    /// The study vault; `None` means the category picker.
    Vault(Option<Category>),
    Summary,
    Notebook,
    Analytics,
    Schedule,
    Settings,
}

impl Page {
    pub fn is_vault_module(&self) -> bool {
        matches!(self, Page::Vault(Some(_)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Navigation {
    page: Page,
    sidebar_collapsed: bool,
}

impl Navigation {
    pub fn page(&self) -> Page {
        self.page
    }

    /// The category module currently mounted, if any.
    pub fn vault_category(&self) -> Option<Category> {
        match self.page {
            Page::Vault(category) => category,
            _ => None,
        }
    }

    pub fn go_to(&mut self, page: Page) {
        self.page = page;
    }

    pub fn open_vault(&mut self, category: Option<Category>) {
        self.page = Page::Vault(category);
    }

    /// Session activation collapses the sidebar.
    pub fn on_session_started(&mut self) {
        self.sidebar_collapsed = true;
    }

    /// Finish restores the sidebar, drops the vault category, and lands on
    /// the summary page.
    pub fn on_session_finished(&mut self) {
        self.sidebar_collapsed = false;
        self.page = Page::Summary;
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    /// The sidebar disappears entirely while a session runs inside a module.
    pub fn sidebar_hidden(&self, session_active: bool) -> bool {
        session_active && self.page.is_vault_module()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_dashboard() {
        let nav = Navigation::default();
        assert_eq!(nav.page(), Page::Dashboard);
        assert!(!nav.sidebar_collapsed());
    }

    #[test]
    fn vault_category_tracks_the_mounted_module() {
        let mut nav = Navigation::default();
        nav.open_vault(Some(Category::Reading));
        assert_eq!(nav.vault_category(), Some(Category::Reading));
        nav.go_to(Page::Dashboard);
        assert_eq!(nav.vault_category(), None);
    }

    #[test]
    fn start_collapses_finish_restores() {
        let mut nav = Navigation::default();
        nav.open_vault(Some(Category::Writing));
        nav.on_session_started();
        assert!(nav.sidebar_collapsed());

        nav.on_session_finished();
        assert!(!nav.sidebar_collapsed());
        assert_eq!(nav.page(), Page::Summary);
        assert_eq!(nav.vault_category(), None);
    }

    #[test]
    fn sidebar_hidden_only_inside_an_active_module() {
        let mut nav = Navigation::default();
        nav.open_vault(Some(Category::Speaking));
        assert!(nav.sidebar_hidden(true));
        assert!(!nav.sidebar_hidden(false));

        nav.go_to(Page::Dashboard);
        assert!(!nav.sidebar_hidden(true));

        nav.open_vault(None);
        assert!(!nav.sidebar_hidden(true));
    }
}
