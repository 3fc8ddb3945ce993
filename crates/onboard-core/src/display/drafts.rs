//! Stored draft formatting.

use std::fmt;

use super::session::{step_title, write_stage1, write_stage2};
use crate::models::{Draft, Role, WizardStep};

/// Formats the draft stored for a role, or its absence.
pub struct DraftView<'a> {
    pub role: Role,
    pub draft: Option<&'a Draft>,
}

impl<'a> DraftView<'a> {
    pub fn new(role: Role, draft: Option<&'a Draft>) -> Self {
        Self { role, draft }
    }
}

impl fmt::Display for DraftView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Draft ({})", self.role.label())?;
        writeln!(f)?;

        let Some(draft) = self.draft.filter(|draft| !draft.is_empty()) else {
            return writeln!(f, "No draft saved.");
        };

        if let Some(stage1) = &draft.stage1_data {
            writeln!(f, "## {}", step_title(WizardStep::Stage1))?;
            writeln!(f)?;
            write_stage1(f, stage1)?;
            writeln!(f)?;
        }
        if let Some(stage2) = &draft.stage2_data {
            writeln!(f, "## {}", step_title(WizardStep::Stage2))?;
            writeln!(f)?;
            write_stage2(f, stage2)?;
        }
        Ok(())
    }
}
