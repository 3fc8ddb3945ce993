//! Two-phase submission of the wizard data.
//!
//! Stage 1 (admin only) is submitted first and awaited; stage 2 is only
//! issued once stage 1 has completed or was skipped. A failure in either
//! phase stops the pipeline, resets progress to 0 and leaves the form data
//! untouched so the user can retry.
//!
//! | step                  | progress | log                               |
//! |-----------------------|----------|-----------------------------------|
//! | stage 1 sent (admin)  | 25       | `Submitting stage 1...`           |
//! | stage 1 saved / skip  | 50       | `Stage 1 saved` (admin only)      |
//! | stage 2 sent          | 75       | `Submitting stage 2...`           |
//! | stage 2 saved         | 100      | `Stage 2 saved`, completion line  |
//! | any failure           | 0        | `Error: <reason>`                 |

use std::sync::Arc;

use log::{error, info};

use crate::{
    api::{Stage1Api, Stage1Payload, Stage2Api, Stage2Payload},
    error::OnboardError,
    models::{Role, Stage1Data, Stage2Data, Submission, SubmissionPhase},
    store::DraftStore,
    validation,
};

pub const LOG_SUBMITTING_STAGE1: &str = "Submitting stage 1...";
pub const LOG_STAGE1_SAVED: &str = "Stage 1 saved";
pub const LOG_SUBMITTING_STAGE2: &str = "Submitting stage 2...";
pub const LOG_STAGE2_SAVED: &str = "Stage 2 saved";
pub const LOG_COMPLETED: &str = "All data processed successfully";

/// Data submitted by one run.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub role: Role,
    pub stage1: Stage1Data,
    pub stage2: Stage2Data,
}

impl SubmissionRequest {
    fn stage2_is_valid(&self) -> bool {
        let stage2 = &self.stage2;
        validation::is_stage2_valid(
            stage2.photo.as_deref(),
            stage2.employment_type.map(|t| t.as_str()),
            stage2.office_location.as_deref(),
            stage2.notes.as_deref(),
        )
    }
}

/// Runs the stage 1 → stage 2 protocol against the collaborators.
#[derive(Clone)]
pub struct TwoPhaseSubmitter {
    stage1: Arc<dyn Stage1Api>,
    stage2: Arc<dyn Stage2Api>,
    drafts: DraftStore,
}

impl TwoPhaseSubmitter {
    pub fn new(stage1: Arc<dyn Stage1Api>, stage2: Arc<dyn Stage2Api>, drafts: DraftStore) -> Self {
        Self {
            stage1,
            stage2,
            drafts,
        }
    }

    /// Submits `request`, reporting every intermediate state to `report`.
    ///
    /// Returns `None` without reporting anything when stage 2 is not valid.
    /// Otherwise returns the terminal state, either `Succeeded` or `Failed`.
    /// On success the role's draft is cleared.
    pub async fn submit<F>(&self, request: &SubmissionRequest, report: F) -> Option<Submission>
    where
        F: Fn(&Submission) + Send + Sync,
    {
        if !request.stage2_is_valid() {
            return None;
        }

        let mut submission = Submission::default();
        let role = request.role;

        if role.sees_stage1() {
            submission.phase = SubmissionPhase::Phase1Running;
            submission.log.push(LOG_SUBMITTING_STAGE1.to_string());
            submission.progress = 25;
            report(&submission);

            let payload = Stage1Payload::from(&request.stage1);
            if let Err(e) = self.stage1.submit_stage1(&payload).await {
                return Some(Self::fail(submission, "stage 1", &e, &report));
            }

            submission.log.push(LOG_STAGE1_SAVED.to_string());
        }
        submission.phase = SubmissionPhase::Phase1Done;
        submission.progress = 50;
        report(&submission);

        submission.phase = SubmissionPhase::Phase2Running;
        submission.log.push(LOG_SUBMITTING_STAGE2.to_string());
        submission.progress = 75;
        report(&submission);

        let payload = Stage2Payload::new(&request.stage1, &request.stage2);
        if let Err(e) = self.stage2.submit_stage2(&payload).await {
            return Some(Self::fail(submission, "stage 2", &e, &report));
        }

        submission.log.push(LOG_STAGE2_SAVED.to_string());
        submission.progress = 100;
        submission.log.push(LOG_COMPLETED.to_string());
        self.drafts.clear(role).await;
        submission.phase = SubmissionPhase::Succeeded;
        report(&submission);

        info!("Submission for {role} completed");
        Some(submission)
    }

    fn fail<F>(
        mut submission: Submission,
        phase: &str,
        e: &OnboardError,
        report: &F,
    ) -> Submission
    where
        F: Fn(&Submission),
    {
        let message = e.to_string();
        error!("Submission failed in {phase}: {message}");
        submission.log.push(format!("Error: {message}"));
        submission.progress = 0;
        submission.phase = SubmissionPhase::Failed { message };
        report(&submission);
        submission
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{
        fakes::{Event, ScriptedBackend},
        models::{EmploymentType, JobRole},
        store::MemoryStore,
    };

    fn complete_stage1() -> Stage1Data {
        Stage1Data {
            full_name: Some("Jane Doe".to_string()),
            email: Some("jane@x.co".to_string()),
            department: Some("Engineering".to_string()),
            job_role: Some(JobRole::Engineer),
            employee_id: Some("ENG-001".to_string()),
        }
    }

    fn complete_stage2() -> Stage2Data {
        Stage2Data {
            photo: Some("aGVsbG8=".to_string()),
            employment_type: Some(EmploymentType::FullTime),
            office_location: Some("Berlin".to_string()),
            notes: Some("Starts Monday".to_string()),
        }
    }

    fn submitter(backend: &Arc<ScriptedBackend>, drafts: DraftStore) -> TwoPhaseSubmitter {
        TwoPhaseSubmitter::new(backend.clone(), backend.clone(), drafts)
    }

    fn request(role: Role) -> SubmissionRequest {
        SubmissionRequest {
            role,
            stage1: complete_stage1(),
            stage2: complete_stage2(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_admin_submits_stage1_before_stage2() {
        let backend = Arc::new(ScriptedBackend::new());
        let drafts = DraftStore::new(Arc::new(MemoryStore::new()));
        let reports = Mutex::new(Vec::new());

        let result = submitter(&backend, drafts)
            .submit(&request(Role::Admin), |s| {
                reports.lock().unwrap().push(s.progress)
            })
            .await
            .expect("submission should start");

        assert_eq!(result.phase, SubmissionPhase::Succeeded);
        assert_eq!(result.progress, 100);
        assert_eq!(
            backend.events(),
            vec![
                Event::Stage1Started,
                Event::Stage1Finished,
                Event::Stage2Started,
                Event::Stage2Finished,
            ]
        );
        assert_eq!(*reports.lock().unwrap(), vec![25, 50, 75, 100]);
        assert_eq!(
            result.log,
            vec![
                LOG_SUBMITTING_STAGE1,
                LOG_STAGE1_SAVED,
                LOG_SUBMITTING_STAGE2,
                LOG_STAGE2_SAVED,
                LOG_COMPLETED,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stage2_payload_carries_stage1_identity() {
        let backend = Arc::new(ScriptedBackend::new());
        let drafts = DraftStore::new(Arc::new(MemoryStore::new()));

        submitter(&backend, drafts)
            .submit(&request(Role::Admin), |_| {})
            .await;

        let stage2 = backend.inner().stage2_records();
        assert_eq!(stage2.len(), 1);
        assert_eq!(stage2[0].email, "jane@x.co");
        assert_eq!(stage2[0].employee_id, "ENG-001");
        assert_eq!(stage2[0].employment_type.as_deref(), Some("Full-time"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ops_skips_stage1() {
        let backend = Arc::new(ScriptedBackend::new());
        let drafts = DraftStore::new(Arc::new(MemoryStore::new()));
        let reports = Mutex::new(Vec::new());

        let result = submitter(&backend, drafts)
            .submit(&request(Role::Ops), |s| {
                reports.lock().unwrap().push(s.progress)
            })
            .await
            .unwrap();

        assert_eq!(result.phase, SubmissionPhase::Succeeded);
        assert_eq!(
            backend.events(),
            vec![Event::Stage2Started, Event::Stage2Finished]
        );
        assert_eq!(*reports.lock().unwrap(), vec![50, 75, 100]);
        assert!(!result.log.iter().any(|l| l == LOG_SUBMITTING_STAGE1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stage1_failure_never_calls_stage2() {
        let backend = Arc::new(ScriptedBackend::new().failing_stage1("HTTP 500"));
        let drafts = DraftStore::new(Arc::new(MemoryStore::new()));

        let result = submitter(&backend, drafts)
            .submit(&request(Role::Admin), |_| {})
            .await
            .unwrap();

        assert!(matches!(result.phase, SubmissionPhase::Failed { .. }));
        assert_eq!(result.progress, 0);
        assert_eq!(backend.events(), vec![Event::Stage1Started]);
        assert!(result.failure().unwrap().contains("HTTP 500"));
        assert!(result.log.last().unwrap().starts_with("Error: "));
        assert!(result.log.last().unwrap().contains("HTTP 500"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stage2_failure_keeps_draft() {
        let backend = Arc::new(ScriptedBackend::new().failing_stage2("disk full"));
        let drafts = DraftStore::new(Arc::new(MemoryStore::new()));
        let draft = crate::models::Draft::for_role(Role::Admin, &complete_stage1(), &complete_stage2())
            .unwrap();
        drafts.save(Role::Admin, &draft).await;

        let result = submitter(&backend, drafts.clone())
            .submit(&request(Role::Admin), |_| {})
            .await
            .unwrap();

        assert_eq!(result.progress, 0);
        assert_eq!(result.failure().map(|m| m.contains("disk full")), Some(true));
        assert_eq!(drafts.load(Role::Admin).await, Some(draft));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_clears_draft() {
        let backend = Arc::new(ScriptedBackend::new());
        let drafts = DraftStore::new(Arc::new(MemoryStore::new()));
        let draft = crate::models::Draft::for_role(Role::Ops, &Stage1Data::default(), &complete_stage2())
            .unwrap();
        drafts.save(Role::Ops, &draft).await;

        submitter(&backend, drafts.clone())
            .submit(&request(Role::Ops), |_| {})
            .await;

        assert_eq!(drafts.load(Role::Ops).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_stage2_does_not_start() {
        let backend = Arc::new(ScriptedBackend::new());
        let drafts = DraftStore::new(Arc::new(MemoryStore::new()));
        let mut request = request(Role::Admin);
        request.stage2.photo = None;

        let result = submitter(&backend, drafts).submit(&request, |_| {}).await;

        assert!(result.is_none());
        assert!(backend.events().is_empty());
    }
}
