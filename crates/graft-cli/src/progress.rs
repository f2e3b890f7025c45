//! Spinner-backed [`ProgressReporter`].

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use graft_core::application::{ScaffoldStage, ports::ProgressReporter};

const TICK: Duration = Duration::from_millis(80);

/// One spinner per long-running stage, drawn on stderr.
pub struct SpinnerReporter {
    quiet: bool,
    current: Mutex<Option<ProgressBar>>,
}

impl SpinnerReporter {
    /// `quiet` hides every spinner.
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            current: Mutex::new(None),
        }
    }

    fn spinner(&self) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.enable_steady_tick(TICK);
        bar
    }

    fn take(&self) -> Option<ProgressBar> {
        self.current.lock().ok().and_then(|mut current| current.take())
    }
}

/// Spinner text for a stage: (running, done, failed).
fn messages(stage: ScaffoldStage) -> (&'static str, &'static str, &'static str) {
    match stage {
        ScaffoldStage::Acquisition => (
            "Downloading template...",
            "Template downloaded",
            "Template download failed",
        ),
        ScaffoldStage::MetadataMerge => (
            "Updating package.json...",
            "package.json updated",
            "Could not update package.json",
        ),
        ScaffoldStage::Preflight => ("Checking prerequisites...", "Ready", "Preflight failed"),
        ScaffoldStage::DirectoryCheck => (
            "Checking target directory...",
            "Target directory ready",
            "Target directory check failed",
        ),
        ScaffoldStage::Selection => ("Selecting template...", "Template selected", "Selection failed"),
    }
}

impl ProgressReporter for SpinnerReporter {
    fn stage_started(&self, stage: ScaffoldStage) {
        // A stage that never finished leaves its spinner behind.
        if let Some(stale) = self.take() {
            stale.finish_and_clear();
        }

        let bar = self.spinner();
        bar.set_message(messages(stage).0);
        if let Ok(mut current) = self.current.lock() {
            *current = Some(bar);
        }
    }

    fn stage_succeeded(&self, stage: ScaffoldStage) {
        if let Some(bar) = self.take() {
            bar.finish_with_message(format!("\u{2713} {}", messages(stage).1));
        }
    }

    fn stage_failed(&self, stage: ScaffoldStage) {
        if let Some(bar) = self.take() {
            bar.abandon_with_message(format!("\u{2717} {}", messages(stage).2));
        }
    }
}
