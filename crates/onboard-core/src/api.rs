//! Collaborator contracts for the two backend resources.
//!
//! The stage 1 backend owns departments and basic info records; the stage 2
//! backend owns office locations and detail records. The wizard only sees
//! these traits, so tests substitute in-process fakes and the CLI plugs in
//! [`HttpBackend`].

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{Page, Stage1Data, Stage1Record, Stage2Data, Stage2Record, SuggestOption},
};

pub mod config;
pub mod http;
pub mod memory;

pub use config::ApiConfig;
pub use http::HttpBackend;
pub use memory::MemoryBackend;

/// Stage 1 payload: basic identity info plus the derived employee ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stage1Payload {
    pub full_name: String,
    pub email: String,
    pub department: String,
    #[serde(rename = "role")]
    pub job_role: String,
    pub employee_id: String,
}

impl From<&Stage1Data> for Stage1Payload {
    fn from(data: &Stage1Data) -> Self {
        Self {
            full_name: data.full_name.clone().unwrap_or_default(),
            email: data.email.clone().unwrap_or_default(),
            department: data.department.clone().unwrap_or_default(),
            job_role: data.job_role.map(|r| r.to_string()).unwrap_or_default(),
            employee_id: data.employee_id.clone().unwrap_or_default(),
        }
    }
}

/// Stage 2 payload. `email` and `employee_id` are carried over from stage 1
/// so both records can be joined later; they are empty for ops sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stage2Payload {
    pub email: String,
    pub employee_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Stage2Payload {
    pub fn new(stage1: &Stage1Data, stage2: &Stage2Data) -> Self {
        Self {
            email: stage1.email.clone().unwrap_or_default(),
            employee_id: stage1.employee_id.clone().unwrap_or_default(),
            photo: stage2.photo.clone(),
            employment_type: stage2.employment_type.map(|t| t.to_string()),
            office_location: stage2.office_location.clone(),
            notes: stage2.notes.clone(),
        }
    }
}

/// Stage 1 backend: departments and basic info.
#[async_trait]
pub trait Stage1Api: Send + Sync {
    /// Departments whose name matches `query`.
    async fn fetch_department_suggestions(&self, query: &str) -> Result<Vec<SuggestOption>>;

    /// One page of stage 1 records.
    async fn fetch_stage1_records(&self, page: u32, limit: u32) -> Result<Page<Stage1Record>>;

    async fn submit_stage1(&self, payload: &Stage1Payload) -> Result<()>;
}

/// Stage 2 backend: office locations and employment details.
#[async_trait]
pub trait Stage2Api: Send + Sync {
    /// Office locations whose name matches `query`.
    async fn fetch_location_suggestions(&self, query: &str) -> Result<Vec<SuggestOption>>;

    /// One page of stage 2 records.
    async fn fetch_stage2_records(&self, page: u32, limit: u32) -> Result<Page<Stage2Record>>;

    async fn submit_stage2(&self, payload: &Stage2Payload) -> Result<()>;
}

/// Counts existing stage 1 records in `department`, walking every page.
pub async fn count_department_records(
    api: &dyn Stage1Api,
    department: &str,
    page_limit: u32,
) -> Result<usize> {
    let mut count = 0;
    let mut page = 1;

    loop {
        let records = api.fetch_stage1_records(page, page_limit).await?;
        count += records
            .data
            .iter()
            .filter(|record| record.department == department)
            .count();

        match records.next {
            Some(next) if next > page => page = next,
            _ => break,
        }
    }

    debug!("Found {count} existing records in department {department}");
    Ok(count)
}
