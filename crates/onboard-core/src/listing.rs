//! Employee listing across both backends.
//!
//! Stage 2 records are the superset: every submission creates one, while
//! only admin submissions create a stage 1 record. The listing is therefore
//! driven by stage 2 and enriched with stage 1 data where it can be joined.

use std::collections::HashMap;

use log::debug;

use crate::{
    api::{Stage1Api, Stage2Api},
    error::Result,
    models::{Employee, Page, Stage1Record, Stage2Record},
    params::ListEmployees,
};

/// Shown for text that only stage 1 knows about.
pub const MISSING_TEXT: &str = "—";
/// Shown for stage 1 classifications of employees without stage 1 data.
pub const NOT_APPLICABLE: &str = "N/A";

/// Stage 1 records keyed by email and by employee ID.
struct Stage1Index<'a> {
    by_key: HashMap<&'a str, &'a Stage1Record>,
}

impl<'a> Stage1Index<'a> {
    fn new(records: &'a [Stage1Record]) -> Self {
        let mut by_key = HashMap::new();
        for record in records {
            if !record.email.is_empty() {
                by_key.insert(record.email.as_str(), record);
            }
            if !record.employee_id.is_empty() {
                by_key.insert(record.employee_id.as_str(), record);
            }
        }
        Self { by_key }
    }

    fn join(&self, detail: &Stage2Record) -> Employee {
        let basic = [detail.email.as_str(), detail.employee_id.as_str()]
            .into_iter()
            .filter(|key| !key.is_empty())
            .find_map(|key| self.by_key.get(key).copied());

        match basic {
            Some(basic) => Employee {
                id: basic.id.clone(),
                employee_id: basic.employee_id.clone(),
                full_name: basic.full_name.clone(),
                email: basic.email.clone(),
                department: basic.department.clone(),
                job_role: basic.job_role.clone(),
                photo: detail.photo.clone(),
                employment_type: detail.employment_type.clone(),
                office_location: detail.office_location.clone(),
                notes: detail.notes.clone(),
            },
            None => Employee {
                id: detail.id.clone(),
                employee_id: or_missing(&detail.employee_id),
                full_name: MISSING_TEXT.to_string(),
                email: or_missing(&detail.email),
                department: NOT_APPLICABLE.to_string(),
                job_role: NOT_APPLICABLE.to_string(),
                photo: detail.photo.clone(),
                employment_type: detail.employment_type.clone(),
                office_location: detail.office_location.clone(),
                notes: detail.notes.clone(),
            },
        }
    }
}

fn or_missing(value: &str) -> String {
    if value.is_empty() {
        MISSING_TEXT.to_string()
    } else {
        value.to_string()
    }
}

/// Joins stage 2 records with stage 1 records by email, then employee ID.
///
/// Always returns exactly one employee per stage 2 record, in stage 2
/// order. Unmatched records get placeholders for the stage 1 fields.
pub fn merge_employees(stage1: &[Stage1Record], stage2: &[Stage2Record]) -> Vec<Employee> {
    let index = Stage1Index::new(stage1);
    stage2.iter().map(|detail| index.join(detail)).collect()
}

/// Fetches the same page from both backends concurrently and merges it.
///
/// Pagination metadata is taken from the stage 2 page.
///
/// # Errors
///
/// Returns the first collaborator error.
pub async fn list_employees(
    stage1: &dyn Stage1Api,
    stage2: &dyn Stage2Api,
    params: &ListEmployees,
) -> Result<Page<Employee>> {
    let (basic, details) = tokio::try_join!(
        stage1.fetch_stage1_records(params.page, params.limit),
        stage2.fetch_stage2_records(params.page, params.limit),
    )?;
    debug!(
        "Merging {} stage 1 and {} stage 2 records for page {}",
        basic.data.len(),
        details.data.len(),
        params.page
    );

    let index = Stage1Index::new(&basic.data);
    Ok(details.map(|detail| index.join(&detail)))
}
