#![allow(dead_code)]

use std::sync::Arc;

use onboard_core::{
    params::{Stage1Patch, Stage2Patch},
    wizard::QueryRoleSignal,
    MemoryBackend, SqliteStore, Wizard, WizardBuilder,
};
use tempfile::TempDir;

/// Helper function to create a draft store in a temporary directory
pub async fn create_test_store() -> (TempDir, Arc<SqliteStore>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = SqliteStore::open(temp_dir.path().join("drafts.db"))
        .await
        .expect("Failed to open draft store");
    (temp_dir, Arc::new(store))
}

/// Helper function to create a wizard for `role` on a shared store and backend
pub async fn create_test_wizard(
    store: &Arc<SqliteStore>,
    backend: &Arc<MemoryBackend>,
    role: Option<&str>,
) -> Wizard {
    WizardBuilder::new()
        .with_backend(backend.clone())
        .with_store(store.clone())
        .with_role_signal(Arc::new(QueryRoleSignal::from_role_param(role)))
        .build()
        .await
        .expect("Failed to create wizard")
}

pub fn complete_stage1(name: &str, email: &str) -> Stage1Patch {
    Stage1Patch {
        full_name: Some(name.to_string()),
        email: Some(email.to_string()),
        department: Some("Engineering".to_string()),
        job_role: Some("Engineer".to_string()),
    }
}

pub fn complete_stage2(location: &str) -> Stage2Patch {
    Stage2Patch {
        photo: Some("aGVsbG8=".to_string()),
        employment_type: Some("Full-time".to_string()),
        office_location: Some(location.to_string()),
        notes: Some("Starts Monday".to_string()),
    }
}
