//! Colored stderr console adapter.

use crate::ports::ConsoleLogger;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::sync::Mutex;

/// ColorConsoleLogger adapter writing progress and status lines to stderr.
///
/// Status goes to stderr so stdout stays clean for shell composition. Uses
/// indicatif for the per-project progress display while projects are being
/// resolved.
pub struct ColorConsoleLogger {
    progress_bar: Mutex<Option<ProgressBar>>,
}

impl ColorConsoleLogger {
    pub fn new() -> Self {
        Self {
            progress_bar: Mutex::new(None),
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut pb_option = self.progress_bar.lock().expect("progress bar lock");
        if let Some(pb) = pb_option.as_ref() {
            pb.clone()
        } else {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}",
                    )
                    .expect("Failed to set progress bar template")
                    .progress_chars("=>-"),
            );
            *pb_option = Some(pb.clone());
            pb
        }
    }

    fn finish_progress_bar(&self) {
        if let Some(pb) = self.progress_bar.lock().expect("progress bar lock").take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for ColorConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger for ColorConsoleLogger {
    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_detail(&self, message: &str) {
        eprintln!("{}", message.green());
    }

    fn report_warning(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!("{}", message.red());
    }

    fn report_error(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!("{}", message.red());
    }

    fn report_progress(&self, current: usize, total: usize, message: &str) {
        let pb = self.get_or_create_progress_bar(total);
        pb.set_position(current as u64);
        pb.set_message(message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!();
        eprintln!("{}", message.green());
    }
}
