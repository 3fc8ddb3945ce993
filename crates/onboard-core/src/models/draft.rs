//! Persisted, role-scoped drafts of unsubmitted form data.

use serde::{Deserialize, Serialize};

use super::{Role, Stage1Data, Stage2Data};

/// Snapshot of in-progress form data stored under a role's draft key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage1_data: Option<Stage1Data>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage2_data: Option<Stage2Data>,
}

impl Draft {
    /// Builds the draft that `role` is allowed to persist.
    ///
    /// Empty stages are omitted and ops drafts never carry stage 1 data.
    /// Returns `None` when there is nothing worth saving.
    pub fn for_role(role: Role, stage1: &Stage1Data, stage2: &Stage2Data) -> Option<Draft> {
        let stage1_data = (role.sees_stage1() && !stage1.is_empty()).then(|| stage1.clone());
        let stage2_data = (!stage2.is_empty()).then(|| stage2.clone());

        if stage1_data.is_none() && stage2_data.is_none() {
            return None;
        }

        Some(Draft {
            stage1_data,
            stage2_data,
        })
    }

    /// Removes data `role` must never see. Guards against drafts written by
    /// older versions or edited by hand.
    pub fn scoped_to(mut self, role: Role) -> Draft {
        if !role.sees_stage1() {
            self.stage1_data = None;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.stage1_data.as_ref().map_or(true, Stage1Data::is_empty)
            && self.stage2_data.as_ref().map_or(true, Stage2Data::is_empty)
    }
}

/// Merges a loaded draft into the live session data.
///
/// Loaded values win only where the current field is empty, so edits made
/// before a deferred load completes are never overwritten.
pub fn merge_draft(
    current: (&Stage1Data, &Stage2Data),
    loaded: &Draft,
) -> (Stage1Data, Stage2Data) {
    let (stage1, stage2) = current;
    let stage1 = match &loaded.stage1_data {
        Some(loaded) => stage1.merged_with(loaded),
        None => stage1.clone(),
    };
    let stage2 = match &loaded.stage2_data {
        Some(loaded) => stage2.merged_with(loaded),
        None => stage2.clone(),
    };
    (stage1, stage2)
}
