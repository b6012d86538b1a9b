//! Storage configuration and path management for Focusdeck.
//!
//! All file paths flow through one `StorageConfig` so tests can inject a temp
//! root and production code never hard-codes locations.

use std::path::{Path, PathBuf};

use focusdeck_overlay_protocol as overlay;

use crate::error::{CoreError, Result};

/// Central configuration for all Focusdeck storage paths.
///
/// Production code uses `StorageConfig::default_root()` which points to
/// `~/.focusdeck/`. Tests use `StorageConfig::with_root(temp_dir)`.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    root: PathBuf,
}

impl StorageConfig {
    /// Creates a StorageConfig rooted at `~/.focusdeck`.
    pub fn default_root() -> Result<Self> {
        let home = dirs::home_dir().ok_or(CoreError::HomeDirNotFound)?;
        Ok(Self {
            root: home.join(".focusdeck"),
        })
    }

    /// Creates a StorageConfig with a custom root directory.
    /// Used for testing with temp directories.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// Returns the root directory for Focusdeck data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to data.json (profile, daily logs, vocabulary).
    pub fn data_file(&self) -> PathBuf {
        self.root.join("data.json")
    }

    /// Path to active-session.json (the live session quadruple).
    pub fn session_file(&self) -> PathBuf {
        self.root.join("active-session.json")
    }

    /// Path to the status line the overlay polls.
    pub fn overlay_status_file(&self) -> PathBuf {
        self.root.join(overlay::STATUS_FILE)
    }

    /// Path to the command file the overlay writes.
    pub fn overlay_command_file(&self) -> PathBuf {
        self.root.join(overlay::COMMAND_FILE)
    }

    /// Path to the scratchpad text pushed down to the overlay.
    pub fn overlay_notes_file(&self) -> PathBuf {
        self.root.join(overlay::NOTES_FILE)
    }

    /// Path to the scratchpad text typed into the overlay.
    pub fn overlay_notes_from_file(&self) -> PathBuf {
        self.root.join(overlay::NOTES_FROM_OVERLAY_FILE)
    }

    /// Path to the shell's log directory.
    pub fn log_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Ensures the root directory exists.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        fs_err::create_dir_all(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_with_root_sets_custom_path() {
        let config = StorageConfig::with_root(PathBuf::from("/tmp/test-focusdeck"));
        assert_eq!(config.root(), Path::new("/tmp/test-focusdeck"));
    }

    #[test]
    fn test_data_file_path() {
        let config = StorageConfig::with_root(PathBuf::from("/tmp/focusdeck"));
        assert_eq!(config.data_file(), PathBuf::from("/tmp/focusdeck/data.json"));
    }

    #[test]
    fn test_session_file_path() {
        let config = StorageConfig::with_root(PathBuf::from("/tmp/focusdeck"));
        assert_eq!(
            config.session_file(),
            PathBuf::from("/tmp/focusdeck/active-session.json")
        );
    }

    #[test]
    fn test_overlay_paths_use_protocol_names() {
        let config = StorageConfig::with_root(PathBuf::from("/tmp/focusdeck"));
        assert_eq!(
            config.overlay_status_file(),
            PathBuf::from("/tmp/focusdeck/overlay-status.txt")
        );
        assert_eq!(
            config.overlay_command_file(),
            PathBuf::from("/tmp/focusdeck/overlay-cmd.txt")
        );
    }

    #[test]
    fn test_ensure_dirs_creates_root() {
        let temp = TempDir::new().unwrap();
        let config = StorageConfig::with_root(temp.path().join("nested"));
        config.ensure_dirs().unwrap();
        assert!(config.root().exists());
    }
}
