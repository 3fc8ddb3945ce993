//! Suggest sources backed by the collaborator APIs.

use std::sync::Arc;

use async_trait::async_trait;

use super::SuggestSource;
use crate::{
    api::{Stage1Api, Stage2Api},
    error::Result,
    models::SuggestOption,
};

/// Department lookup on the stage 1 backend.
pub struct DepartmentSource(pub Arc<dyn Stage1Api>);

#[async_trait]
impl SuggestSource for DepartmentSource {
    async fn lookup(&self, query: &str) -> Result<Vec<SuggestOption>> {
        self.0.fetch_department_suggestions(query).await
    }
}

/// Office location lookup on the stage 2 backend.
pub struct LocationSource(pub Arc<dyn Stage2Api>);

#[async_trait]
impl SuggestSource for LocationSource {
    async fn lookup(&self, query: &str) -> Result<Vec<SuggestOption>> {
        self.0.fetch_location_suggestions(query).await
    }
}
