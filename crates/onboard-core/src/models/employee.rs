//! Records stored by the collaborators and the merged employee view.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by a backend. json-server hands out numbers or
/// strings depending on how the record was created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// Autocomplete option returned by the suggestion endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestOption {
    pub id: RecordId,
    #[serde(rename = "name")]
    pub label: String,
}

impl SuggestOption {
    pub fn new(id: impl Into<RecordId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

/// Stage 1 record as stored by the stage 1 backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stage1Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub full_name: String,
    pub email: String,
    pub department: String,
    #[serde(rename = "role")]
    pub job_role: String,
    pub employee_id: String,
}

/// Stage 2 record as stored by the stage 2 backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stage2Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Employee row of the listing, joining both stages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Option<RecordId>,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub job_role: String,
    pub photo: Option<String>,
    pub employment_type: Option<String>,
    pub office_location: Option<String>,
    pub notes: Option<String>,
}
