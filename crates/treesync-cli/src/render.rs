//! Terminal rendering of replication events

use colored::Colorize;
use treesync_core::{FileEvent, Outcome, SummaryEvent, SyncObserver};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Prints one line per copied or failed file and a closing summary.
///
/// File lines start with the event's UTC timestamp. Skipped files are only
/// shown in verbose mode.
pub struct TextRenderer {
    verbose: bool,
    dry_run: bool,
}

impl TextRenderer {
    pub fn new(verbose: bool, dry_run: bool) -> Self {
        Self { verbose, dry_run }
    }

    /// The line printed for `event`, if any.
    pub fn file_line(&self, event: &FileEvent) -> Option<String> {
        let status = match event.outcome {
            Outcome::Copied => {
                let label = if self.dry_run { "would copy" } else { "copied" };
                format!("{} {}", label.green(), event.relative_path)
            }
            Outcome::Skipped if self.verbose => {
                format!("{} {}", "skipped".dimmed(), event.relative_path)
            }
            Outcome::Skipped => return None,
            Outcome::Failed => format!(
                "{} {}: {}",
                "failed".red().bold(),
                event.relative_path,
                event.error.as_deref().unwrap_or("unknown error")
            ),
        };
        let stamp = event.timestamp.format(TIMESTAMP_FORMAT).to_string();
        Some(format!("{} {}", stamp.dimmed(), status))
    }

    pub fn summary_line(&self, summary: &SummaryEvent) -> String {
        let mut line = format!(
            "Sync complete: {} copied, {} skipped",
            summary.copied, summary.skipped
        );
        if summary.failed > 0 {
            line.push_str(&format!(", {}", format!("{} failed", summary.failed).red()));
        }
        if self.dry_run {
            line.push_str(" (dry run)");
        }
        line
    }
}

impl SyncObserver for TextRenderer {
    fn on_file(&self, event: &FileEvent) {
        if let Some(line) = self.file_line(event) {
            println!("{}", line);
        }
    }

    fn on_complete(&self, summary: &SummaryEvent) {
        println!("{}", self.summary_line(summary));
    }
}
