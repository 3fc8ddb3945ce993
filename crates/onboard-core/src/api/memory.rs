//! In-process backend holding both stages' records.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{Stage1Api, Stage1Payload, Stage2Api, Stage2Payload};
use crate::{
    error::Result,
    models::{Page, RecordId, Stage1Record, Stage2Record, SuggestOption},
    suggest::filter_options,
};

const DEFAULT_DEPARTMENTS: [&str; 5] = [
    "Engineering",
    "Finance",
    "Human Resources",
    "Marketing",
    "Operations",
];
const DEFAULT_LOCATIONS: [&str; 4] = ["Berlin", "Jakarta", "London", "Singapore"];

#[derive(Default)]
struct Records {
    stage1: Vec<Stage1Record>,
    stage2: Vec<Stage2Record>,
}

/// Backend living entirely in memory. Suggestion endpoints behave like
/// json-server's `name_like`; submits append a record with a fresh id.
pub struct MemoryBackend {
    departments: Vec<SuggestOption>,
    locations: Vec<SuggestOption>,
    records: Mutex<Records>,
}

impl MemoryBackend {
    /// Backend seeded with a small department and location catalogue.
    pub fn new() -> Self {
        Self::with_catalogues(&DEFAULT_DEPARTMENTS, &DEFAULT_LOCATIONS)
    }

    pub fn with_catalogues(departments: &[&str], locations: &[&str]) -> Self {
        let catalogue = |names: &[&str]| {
            names
                .iter()
                .enumerate()
                .map(|(i, name)| SuggestOption::new(i as u64 + 1, *name))
                .collect()
        };
        Self {
            departments: catalogue(departments),
            locations: catalogue(locations),
            records: Mutex::new(Records::default()),
        }
    }

    fn records(&self) -> MutexGuard<'_, Records> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds an existing stage 1 record.
    pub fn seed_stage1(&self, record: Stage1Record) {
        self.records().stage1.push(record);
    }

    pub fn stage1_records(&self) -> Vec<Stage1Record> {
        self.records().stage1.clone()
    }

    pub fn stage2_records(&self) -> Vec<Stage2Record> {
        self.records().stage2.clone()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Stage1Api for MemoryBackend {
    async fn fetch_department_suggestions(&self, query: &str) -> Result<Vec<SuggestOption>> {
        Ok(filter_options(&self.departments, query))
    }

    async fn fetch_stage1_records(&self, page: u32, limit: u32) -> Result<Page<Stage1Record>> {
        Ok(Page::paginate(self.stage1_records(), page, limit))
    }

    async fn submit_stage1(&self, payload: &Stage1Payload) -> Result<()> {
        let mut records = self.records();
        let id = RecordId::Number(records.stage1.len() as u64 + 1);
        records.stage1.push(Stage1Record {
            id: Some(id),
            full_name: payload.full_name.clone(),
            email: payload.email.clone(),
            department: payload.department.clone(),
            job_role: payload.job_role.clone(),
            employee_id: payload.employee_id.clone(),
        });
        Ok(())
    }
}

#[async_trait]
impl Stage2Api for MemoryBackend {
    async fn fetch_location_suggestions(&self, query: &str) -> Result<Vec<SuggestOption>> {
        Ok(filter_options(&self.locations, query))
    }

    async fn fetch_stage2_records(&self, page: u32, limit: u32) -> Result<Page<Stage2Record>> {
        Ok(Page::paginate(self.stage2_records(), page, limit))
    }

    async fn submit_stage2(&self, payload: &Stage2Payload) -> Result<()> {
        let mut records = self.records();
        let id = RecordId::Number(records.stage2.len() as u64 + 1);
        records.stage2.push(Stage2Record {
            id: Some(id),
            email: payload.email.clone(),
            employee_id: payload.employee_id.clone(),
            photo: payload.photo.clone(),
            employment_type: payload.employment_type.clone(),
            office_location: payload.office_location.clone(),
            notes: payload.notes.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::count_department_records;

    fn record(department: &str, n: usize) -> Stage1Record {
        Stage1Record {
            id: None,
            full_name: format!("Employee {n}"),
            email: format!("e{n}@x.co"),
            department: department.to_string(),
            job_role: "Engineer".to_string(),
            employee_id: String::new(),
        }
    }

    #[tokio::test]
    async fn test_department_suggestions_match_name_like() {
        let backend = MemoryBackend::new();
        let options = backend.fetch_department_suggestions("ing").await.unwrap();
        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Engineering", "Marketing"]);
    }

    #[tokio::test]
    async fn test_count_walks_every_page() {
        let backend = MemoryBackend::new();
        for n in 0..23 {
            let department = if n % 2 == 0 { "Engineering" } else { "Finance" };
            backend.seed_stage1(record(department, n));
        }

        let count = count_department_records(&backend, "Engineering", 5)
            .await
            .unwrap();
        assert_eq!(count, 12);

        let none = count_department_records(&backend, "Legal", 5).await.unwrap();
        assert_eq!(none, 0);
    }

    #[tokio::test]
    async fn test_submits_append_records() {
        let backend = MemoryBackend::new();
        backend
            .submit_stage2(&Stage2Payload {
                email: String::new(),
                employee_id: String::new(),
                photo: Some("aGk=".to_string()),
                employment_type: Some("Contract".to_string()),
                office_location: Some("Berlin".to_string()),
                notes: Some("night shift".to_string()),
            })
            .await
            .unwrap();

        let page = backend.fetch_stage2_records(1, 10).await.unwrap();
        assert_eq!(page.items, 1);
        assert_eq!(page.data[0].id, Some(RecordId::Number(1)));
    }
}
