//! Submission progress and log formatting.

use std::fmt;

use crate::models::{Submission, SubmissionPhase};

const BAR_WIDTH: usize = 20;

/// Formats a submission as a progress bar followed by its log.
///
/// Log lines are marked `✓` once done, `➤` while the last line is still in
/// flight and `✗` for errors.
pub struct SubmissionReport<'a>(pub &'a Submission);

impl fmt::Display for SubmissionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let submission = self.0;
        writeln!(f, "## Submission")?;
        writeln!(f)?;

        let filled = usize::from(submission.progress.min(100)) * BAR_WIDTH / 100;
        writeln!(
            f,
            "`[{}{}] {:>3}%`",
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
            submission.progress
        )?;
        writeln!(f)?;

        let running = submission.is_running();
        let last = submission.log.len().saturating_sub(1);
        for (i, line) in submission.log.iter().enumerate() {
            let icon = if line.starts_with("Error:") {
                "✗"
            } else if running && i == last {
                "➤"
            } else {
                "✓"
            };
            writeln!(f, "- {icon} {line}")?;
        }

        match &submission.phase {
            SubmissionPhase::Succeeded => {
                writeln!(f)?;
                writeln!(f, "**Submitted.**")?;
            }
            SubmissionPhase::Failed { .. } => {
                writeln!(f)?;
                writeln!(f, "**Submission failed.** Your data is kept; submit again to retry.")?;
            }
            _ => {}
        }
        Ok(())
    }
}
