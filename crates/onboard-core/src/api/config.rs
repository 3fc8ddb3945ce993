//! Backend endpoint configuration.

use std::{env, time::Duration};

use crate::error::{OnboardError, Result};

/// Environment variable holding the stage 1 backend base URL.
pub const STAGE1_API_ENV: &str = "ONBOARD_STAGE1_API";
/// Environment variable holding the stage 2 backend base URL.
pub const STAGE2_API_ENV: &str = "ONBOARD_STAGE2_API";

/// Base URLs of both backends.
///
/// Missing URLs are tolerated until a call actually needs them; that call
/// then fails with a descriptive `Configuration` error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    pub stage1_base_url: Option<String>,
    pub stage2_base_url: Option<String>,
    /// Artificial delay before each submit, for demoing progress.
    pub submit_delay: Option<Duration>,
}

impl ApiConfig {
    /// Reads both base URLs from the environment.
    pub fn from_env() -> Self {
        Self {
            stage1_base_url: env::var(STAGE1_API_ENV).ok(),
            stage2_base_url: env::var(STAGE2_API_ENV).ok(),
            submit_delay: None,
        }
    }

    pub fn with_stage1_base_url(mut self, url: Option<String>) -> Self {
        if url.is_some() {
            self.stage1_base_url = url;
        }
        self
    }

    pub fn with_stage2_base_url(mut self, url: Option<String>) -> Self {
        if url.is_some() {
            self.stage2_base_url = url;
        }
        self
    }

    pub fn with_submit_delay(mut self, delay: Option<Duration>) -> Self {
        self.submit_delay = delay;
        self
    }

    pub fn stage1_base_url(&self) -> Result<&str> {
        require(self.stage1_base_url.as_deref(), STAGE1_API_ENV, "departments & basic info")
    }

    pub fn stage2_base_url(&self) -> Result<&str> {
        require(self.stage2_base_url.as_deref(), STAGE2_API_ENV, "locations & details")
    }
}

fn require<'a>(url: Option<&'a str>, var: &str, serves: &str) -> Result<&'a str> {
    match url.map(str::trim) {
        Some(url) if !url.is_empty() => Ok(url.trim_end_matches('/')),
        _ => Err(OnboardError::Configuration {
            message: format!(
                "missing backend URL for {serves}. Set {var} (or pass the matching \
                 --stage1-api/--stage2-api flag) to the base URL of the running backend"
            ),
        }),
    }
}
