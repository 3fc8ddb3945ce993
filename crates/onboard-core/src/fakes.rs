//! Scripted collaborators shared by the unit tests.

use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    api::{MemoryBackend, Stage1Api, Stage1Payload, Stage2Api, Stage2Payload},
    error::{OnboardError, Result},
    models::{Page, Stage1Record, Stage2Record, SuggestOption},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Stage1Started,
    Stage1Finished,
    Stage2Started,
    Stage2Finished,
    RecordsFetched,
}

/// [`MemoryBackend`] with a call journal, scripted failures and latency.
pub struct ScriptedBackend {
    inner: MemoryBackend,
    events: Mutex<Vec<Event>>,
    stage1_failure: Mutex<Option<String>>,
    stage2_failure: Option<String>,
    records_failure: Option<String>,
    submit_latency: Duration,
    records_latencies: Mutex<VecDeque<Duration>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            inner: MemoryBackend::new(),
            events: Mutex::new(Vec::new()),
            stage1_failure: Mutex::new(None),
            stage2_failure: None,
            records_failure: None,
            submit_latency: Duration::from_millis(300),
            records_latencies: Mutex::new(VecDeque::new()),
        }
    }

    pub fn failing_stage1(self, message: &str) -> Self {
        *lock(&self.stage1_failure) = Some(message.to_string());
        self
    }

    pub fn failing_stage2(mut self, message: &str) -> Self {
        self.stage2_failure = Some(message.to_string());
        self
    }

    pub fn failing_records(mut self, message: &str) -> Self {
        self.records_failure = Some(message.to_string());
        self
    }

    /// Latency of the next record fetches, one entry per call. Later calls
    /// answer immediately.
    pub fn with_records_latencies(self, latencies: &[Duration]) -> Self {
        lock(&self.records_latencies).extend(latencies.iter().copied());
        self
    }

    /// Lets stage 1 succeed from now on.
    pub fn recover_stage1(&self) {
        *lock(&self.stage1_failure) = None;
    }

    pub fn inner(&self) -> &MemoryBackend {
        &self.inner
    }

    pub fn events(&self) -> Vec<Event> {
        lock(&self.events)
            .iter()
            .filter(|e| **e != Event::RecordsFetched)
            .cloned()
            .collect()
    }

    pub fn records_fetches(&self) -> usize {
        lock(&self.events)
            .iter()
            .filter(|e| **e == Event::RecordsFetched)
            .count()
    }

    fn record(&self, event: Event) {
        lock(&self.events).push(event);
    }

    fn failure(message: &str) -> OnboardError {
        OnboardError::Transport {
            url: "http://localhost".to_string(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl Stage1Api for ScriptedBackend {
    async fn fetch_department_suggestions(&self, query: &str) -> Result<Vec<SuggestOption>> {
        self.inner.fetch_department_suggestions(query).await
    }

    async fn fetch_stage1_records(&self, page: u32, limit: u32) -> Result<Page<Stage1Record>> {
        self.record(Event::RecordsFetched);
        let latency = lock(&self.records_latencies).pop_front();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(message) = &self.records_failure {
            return Err(Self::failure(message));
        }
        self.inner.fetch_stage1_records(page, limit).await
    }

    async fn submit_stage1(&self, payload: &Stage1Payload) -> Result<()> {
        self.record(Event::Stage1Started);
        tokio::time::sleep(self.submit_latency).await;
        let failure = lock(&self.stage1_failure).clone();
        if let Some(message) = failure {
            return Err(Self::failure(&message));
        }
        self.inner.submit_stage1(payload).await?;
        self.record(Event::Stage1Finished);
        Ok(())
    }
}

#[async_trait]
impl Stage2Api for ScriptedBackend {
    async fn fetch_location_suggestions(&self, query: &str) -> Result<Vec<SuggestOption>> {
        self.inner.fetch_location_suggestions(query).await
    }

    async fn fetch_stage2_records(&self, page: u32, limit: u32) -> Result<Page<Stage2Record>> {
        self.inner.fetch_stage2_records(page, limit).await
    }

    async fn submit_stage2(&self, payload: &Stage2Payload) -> Result<()> {
        self.record(Event::Stage2Started);
        tokio::time::sleep(self.submit_latency).await;
        if let Some(message) = &self.stage2_failure {
            return Err(Self::failure(message));
        }
        self.inner.submit_stage2(payload).await?;
        self.record(Event::Stage2Finished);
        Ok(())
    }
}
