use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use sweepr_core::report::{ProgressObserver, ProgressSnapshot};

/// Progress bar over issued targets, with the running open count as its
/// message. Draws on stderr, so piping stdout stays safe.
pub struct SweepProgress {
    bar: ProgressBar,
}

impl SweepProgress {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        let style = ProgressStyle::with_template("{spinner:.blue} [{bar:32}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▓░")
            .tick_strings(&[
                "▁▁▁▁▁",
                "▁▂▂▂▁",
                "▁▄▂▄▁",
                "▂▄▆▄▂",
                "▄▆█▆▄",
                "▂▄▆▄▂",
                "▁▄▂▄▁",
                "▁▂▂▂▁",
            ]);

        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for SweepProgress {
    fn on_progress(&mut self, snapshot: ProgressSnapshot) {
        self.bar.set_position(snapshot.issued);
        self.bar.set_message(format!(
            "{} open",
            snapshot.open_found.to_string().green().bold()
        ));
    }
}
