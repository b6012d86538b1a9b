//! Focusdeck shell entrypoint.
//!
//! A headless, single-threaded host for the session controller: wires the
//! real overlay files to the HUD bridge, polls inbound overlay commands at
//! 500 ms, and drives the 1 Hz session tick.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use focus_core::{SessionController, StorageConfig};
use focusdeck_overlay_protocol::StatusLine;
use tracing::{error, info, warn};

mod logging;
mod overlay;

use overlay::{FileOverlaySink, OverlayPoller};

const POLL_INTERVAL: Duration = Duration::from_millis(500);
const TICK_INTERVAL: Duration = Duration::from_secs(1);

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

extern "C" fn request_shutdown(_signal: libc::c_int) {
    SHUTDOWN.store(true, Ordering::SeqCst);
}

#[derive(Parser)]
#[command(name = "focusdeck-shell")]
#[command(about = "Focusdeck session shell")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the session event loop
    Run {
        /// Storage root (defaults to ~/.focusdeck)
        #[arg(long, value_name = "PATH")]
        root: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { root } => {
            let config = match storage_config(root) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("failed to resolve storage root: {}", err);
                    std::process::exit(1);
                }
            };
            let _logging_guard = logging::init(&config.log_dir());

            if let Err(err) = config.ensure_dirs() {
                error!(error = %err, "Failed to create storage root");
                std::process::exit(1);
            }

            run(&config);
        }
    }
}

fn storage_config(root: Option<PathBuf>) -> focus_core::Result<StorageConfig> {
    match root {
        Some(root) => Ok(StorageConfig::with_root(root)),
        None => StorageConfig::default_root(),
    }
}

fn run(config: &StorageConfig) {
    let handler = request_shutdown as extern "C" fn(libc::c_int);
    unsafe {
        libc::signal(libc::SIGINT, handler as libc::sighandler_t);
        libc::signal(libc::SIGTERM, handler as libc::sighandler_t);
    }

    let mut sink = FileOverlaySink::new(config);
    if let Err(err) = sink.reset() {
        warn!(error = %err, "Failed to reset overlay status file");
    }

    let mut controller = SessionController::new(config, Box::new(sink));
    let mut poller = OverlayPoller::new(config);
    info!(root = %config.root().display(), "Focusdeck shell started");

    let mut last_tick = Instant::now();
    while !SHUTDOWN.load(Ordering::SeqCst) {
        std::thread::sleep(POLL_INTERVAL);
        let now_ms = chrono::Utc::now().timestamp_millis();

        for event in poller.poll() {
            controller.handle_overlay_event(event, now_ms);
        }

        if last_tick.elapsed() >= TICK_INTERVAL {
            last_tick = Instant::now();
            controller.tick(now_ms);
        }
    }

    hide_overlay(config);
    info!("Focusdeck shell stopped");
}

fn hide_overlay(config: &StorageConfig) {
    if let Err(err) = fs_err::write(config.overlay_status_file(), StatusLine::Hidden.encode()) {
        warn!(error = %err, "Failed to hide overlay on shutdown");
    }
}
