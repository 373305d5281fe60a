//! Progress display for install and uninstall jobs

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a job runs to its terminal status
pub struct ProgressDisplay {
    spinner: ProgressBar,
}

impl ProgressDisplay {
    /// Create a spinner for a job over `total_units` components
    pub fn start(verb: &str, bundle: &str, total_units: usize) -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap();

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(format!("{} {} ({} components)...", verb, bundle, total_units));
        spinner.enable_steady_tick(Duration::from_millis(100));

        Self { spinner }
    }

    /// Clear the spinner after the job reached a terminal status
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }

    /// Abandon on error, leaving the last message visible
    pub fn abandon(&self) {
        self.spinner.abandon();
    }
}
