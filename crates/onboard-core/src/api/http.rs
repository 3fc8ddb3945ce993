//! json-server style HTTP implementation of both backends.

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use super::{ApiConfig, Stage1Api, Stage1Payload, Stage2Api, Stage2Payload};
use crate::{
    error::{OnboardError, Result},
    models::{Page, Stage1Record, Stage2Record, SuggestOption},
};

/// HTTP client for the stage 1 and stage 2 backends.
///
/// Endpoints, relative to each backend's base URL:
///
/// | backend | method | path |
/// |---------|--------|------|
/// | stage 1 | GET    | `/departments?name_like=q` |
/// | stage 1 | GET    | `/basicInfo?_page=&_per_page=` |
/// | stage 1 | POST   | `/basicInfo` |
/// | stage 2 | GET    | `/locations?name_like=q` |
/// | stage 2 | GET    | `/details?_page=&_per_page=` |
/// | stage 2 | POST   | `/details` |
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    config: ApiConfig,
}

impl HttpBackend {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn send(&self, url: &str, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            error!("Request to {url} failed: {e}");
            OnboardError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Request to {url} returned HTTP {status}");
            return Err(OnboardError::Api {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> Result<T> {
        debug!("GET {url} {query:?}");
        let response = self.send(&url, self.client.get(&url).query(query)).await?;
        response.json().await.map_err(|e| OnboardError::Transport {
            url,
            message: format!("Failed to parse response: {e}"),
        })
    }

    async fn post_json<B: Serialize + Sync>(&self, url: &str, body: &B) -> Result<()> {
        if let Some(delay) = self.config.submit_delay {
            tokio::time::sleep(delay).await;
        }
        debug!("POST {url}");
        self.send(url, self.client.post(url).json(body)).await?;
        Ok(())
    }

    fn page_query(page: u32, limit: u32) -> [(&'static str, String); 2] {
        [("_page", page.to_string()), ("_per_page", limit.to_string())]
    }
}

#[async_trait]
impl Stage1Api for HttpBackend {
    async fn fetch_department_suggestions(&self, query: &str) -> Result<Vec<SuggestOption>> {
        let url = format!("{}/departments", self.config.stage1_base_url()?);
        self.get_json(url, &[("name_like", query.to_string())]).await
    }

    async fn fetch_stage1_records(&self, page: u32, limit: u32) -> Result<Page<Stage1Record>> {
        let url = format!("{}/basicInfo", self.config.stage1_base_url()?);
        self.get_json(url, &Self::page_query(page, limit)).await
    }

    async fn submit_stage1(&self, payload: &Stage1Payload) -> Result<()> {
        let url = format!("{}/basicInfo", self.config.stage1_base_url()?);
        self.post_json(&url, payload).await
    }
}

#[async_trait]
impl Stage2Api for HttpBackend {
    async fn fetch_location_suggestions(&self, query: &str) -> Result<Vec<SuggestOption>> {
        let url = format!("{}/locations", self.config.stage2_base_url()?);
        self.get_json(url, &[("name_like", query.to_string())]).await
    }

    async fn fetch_stage2_records(&self, page: u32, limit: u32) -> Result<Page<Stage2Record>> {
        let url = format!("{}/details", self.config.stage2_base_url()?);
        self.get_json(url, &Self::page_query(page, limit)).await
    }

    async fn submit_stage2(&self, payload: &Stage2Payload) -> Result<()> {
        let url = format!("{}/details", self.config.stage2_base_url()?);
        self.post_json(&url, payload).await
    }
}
