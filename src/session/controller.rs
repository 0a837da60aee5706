//! Submission controller: validates inputs and keeps at most one analysis in flight

use crate::error::{Result, ResumeMatchError};
use crate::model::{AnalysisRequest, AnalysisResult, ResumeUpload};
use crate::service::AnalysisService;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard};

/// Where the session is in its submit cycle.
///
/// ```text
/// Idle ──submit(invalid)──▶ AwaitingInput ──submit(valid)──▶ Submitting
///   └──────submit(valid)──────────────────────────────────▶ Submitting
/// Submitting ──ok──▶ Displaying      Submitting ──err──▶ Failed
/// Displaying / Failed ──submit──▶ (same rules as Idle)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    AwaitingInput,
    Submitting,
    Displaying,
    Failed,
}

#[derive(Debug)]
struct Session {
    phase: SessionPhase,
    result: Option<AnalysisResult>,
    last_error: Option<String>,
}

/// Owns the busy state and the last result of a session.
///
/// `submit` takes `&self`, so a second call while one is outstanding is possible
/// and gets rejected with [`ResumeMatchError::SubmissionInProgress`].
pub struct SubmissionController {
    service: Arc<dyn AnalysisService>,
    session: Mutex<Session>,
}

/// Marks the session busy; restores the prior phase if the submission future is dropped.
struct InFlight<'a> {
    session: &'a Mutex<Session>,
    previous: SessionPhase,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn settle(mut self, phase: SessionPhase, outcome: std::result::Result<AnalysisResult, String>) {
        let mut session = lock(self.session);
        session.phase = phase;
        match outcome {
            Ok(result) => {
                session.result = Some(result);
                session.last_error = None;
            }
            Err(message) => session.last_error = Some(message),
        }
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut session = lock(self.session);
            if session.phase == SessionPhase::Submitting {
                debug!("Submission abandoned, returning to {:?}", self.previous);
                session.phase = self.previous;
            }
        }
    }
}

fn lock(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SubmissionController {
    pub fn new(service: Arc<dyn AnalysisService>) -> Self {
        Self {
            service,
            session: Mutex::new(Session {
                phase: SessionPhase::Idle,
                result: None,
                last_error: None,
            }),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        lock(&self.session).phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase() == SessionPhase::Submitting
    }

    /// Result currently on display. Survives failed submissions.
    pub fn current_result(&self) -> Option<AnalysisResult> {
        lock(&self.session).result.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        lock(&self.session).last_error.clone()
    }

    /// Validate both inputs, then run one analysis call.
    ///
    /// Validation failures never reach the service. The busy phase is left on every path.
    pub async fn submit(
        &self,
        resume: Option<ResumeUpload>,
        job_description: &str,
    ) -> Result<AnalysisResult> {
        let (request, guard) = {
            let mut session = lock(&self.session);

            if session.phase == SessionPhase::Submitting {
                warn!("Ignoring submission while another analysis is in flight");
                return Err(ResumeMatchError::SubmissionInProgress);
            }

            let request = match validate(resume, job_description) {
                Ok(request) => request,
                Err(e) => {
                    session.phase = SessionPhase::AwaitingInput;
                    session.last_error = Some(e.to_string());
                    return Err(e);
                }
            };

            let previous = session.phase;
            session.phase = SessionPhase::Submitting;
            (
                request,
                InFlight {
                    session: &self.session,
                    previous,
                    armed: true,
                },
            )
        };

        info!("Submitting analysis for {}", request.resume.file_name);

        match self.service.analyze(&request).await {
            Ok(result) => {
                info!(
                    "Analysis complete: {:.1}% ({})",
                    result.match_score, result.match_classification
                );
                guard.settle(SessionPhase::Displaying, Ok(result.clone()));
                Ok(result)
            }
            Err(e) => {
                let e = match e {
                    ResumeMatchError::Network(_) => e,
                    other => ResumeMatchError::Network(other.to_string()),
                };
                warn!("Analysis failed: {}", e);
                guard.settle(SessionPhase::Failed, Err(e.to_string()));
                Err(e)
            }
        }
    }
}

fn validate(resume: Option<ResumeUpload>, job_description: &str) -> Result<AnalysisRequest> {
    let resume = match resume {
        Some(resume) if !resume.is_empty() => resume,
        Some(resume) => {
            return Err(ResumeMatchError::Validation(format!(
                "Resume file '{}' is empty",
                resume.file_name
            )))
        }
        None => {
            return Err(ResumeMatchError::Validation(
                "Please upload a resume and paste a job description".to_string(),
            ))
        }
    };

    if job_description.trim().is_empty() {
        return Err(ResumeMatchError::Validation(
            "Please upload a resume and paste a job description".to_string(),
        ));
    }

    Ok(AnalysisRequest {
        resume,
        job_description: job_description.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::result::fixtures::sample_result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingService {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl AnalysisService for CountingService {
        async fn analyze(&self, _request: &AnalysisRequest) -> Result<AnalysisResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.fail {
                Err(ResumeMatchError::Network("connection refused".to_string()))
            } else {
                Ok(sample_result())
            }
        }
    }

    fn controller(fail: bool) -> (Arc<CountingService>, SubmissionController) {
        let service = Arc::new(CountingService { calls: AtomicUsize::new(0), fail });
        let controller = SubmissionController::new(service.clone());
        (service, controller)
    }

    fn resume() -> Option<ResumeUpload> {
        Some(ResumeUpload::new("cv.pdf", b"%PDF-1.4".to_vec()))
    }

    #[test]
    fn test_validation_rejects_blank_text() {
        let err = validate(resume(), "  \n\t").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_validation_rejects_empty_file() {
        let err = validate(Some(ResumeUpload::new("cv.pdf", Vec::new())), "Rust").unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_starts_idle() {
        let (_, controller) = controller(false);
        assert_eq!(controller.phase(), SessionPhase::Idle);
        assert!(!controller.is_busy());
        assert!(controller.current_result().is_none());
    }

    #[tokio::test]
    async fn test_success_moves_to_displaying() {
        let (service, controller) = controller(false);

        let result = controller.submit(resume(), "Python and SQL").await.unwrap();

        assert_eq!(result, sample_result());
        assert_eq!(controller.phase(), SessionPhase::Displaying);
        assert_eq!(controller.current_result(), Some(sample_result()));
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_service_failure_moves_to_failed() {
        let (service, controller) = controller(true);

        let err = controller.submit(resume(), "Python").await.unwrap_err();

        assert!(err.is_network());
        assert_eq!(controller.phase(), SessionPhase::Failed);
        assert!(!controller.is_busy());
        assert!(controller.last_error().unwrap().contains("connection refused"));
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_input_awaits_input() {
        let (service, controller) = controller(false);

        let err = controller.submit(None, "Python").await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(controller.phase(), SessionPhase::AwaitingInput);
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dropped_submission_releases_busy_phase() {
        let (_, controller) = controller(false);

        {
            let pending = controller.submit(resume(), "Python");
            tokio::pin!(pending);
            // Poll once so the submission reaches the service and suspends there.
            let polled = poll_once(pending.as_mut()).await;
            assert!(polled.is_none());
            assert!(controller.is_busy());
        }

        assert_eq!(controller.phase(), SessionPhase::Idle);
    }

    async fn poll_once<F: std::future::Future + Unpin>(fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            out = fut => Some(out),
            _ = std::future::ready(()) => None,
        }
    }
}
