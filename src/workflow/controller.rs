//! Upload/analysis workflow controller
//!
//! Owns the single [`UploadState`] and drives a run through its phases:
//! encode the selected file, submit it, then request analysis. One run at a
//! time per controller; continuations from a superseded run are discarded
//! via a generation counter rather than cancelled.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::state::{AnalysisPhase, UploadState};
use crate::detection::{AnalysisBackend, AnalysisMode, AnalysisResult, DetectionError};
use crate::media::{
    encode_media, validate_candidate, EncodeError, MediaCandidate, MediaFile, ValidationOutcome,
};

/// Fallback shown when a failure carries no message of its own
const GENERIC_FAILURE: &str = "Analysis failed";

/// Progress checkpoint pushed to the webview during a run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub phase: AnalysisPhase,
    pub progress: u8,
}

/// Invoked at each checkpoint; production wires this to a Tauri event
pub type ProgressSink = Box<dyn Fn(ProgressUpdate) + Send + Sync>;

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Detection(#[from] DetectionError),
}

impl RunError {
    /// Human-readable message for a failed run; never empty
    fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        }
    }
}

pub struct WorkflowController {
    backend: Arc<dyn AnalysisBackend>,
    state: Mutex<UploadState>,
    /// Survives resets; the user picks a mode once and keeps it
    mode: Mutex<AnalysisMode>,
    /// Current run generation; continuations compare against this before
    /// applying their result
    generation: AtomicU64,
}

impl WorkflowController {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            backend,
            state: Mutex::new(UploadState::default()),
            mode: Mutex::new(AnalysisMode::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn snapshot(&self) -> UploadState {
        self.state.lock().await.clone()
    }

    pub async fn mode(&self) -> AnalysisMode {
        *self.mode.lock().await
    }

    pub async fn set_mode(&self, mode: AnalysisMode) {
        tracing::info!(mode = mode.as_str(), "Analysis mode changed");
        *self.mode.lock().await = mode;
    }

    /// Validate a candidate and store it on acceptance.
    ///
    /// Rejection is an inline message, not an error: the phase stays Idle and
    /// any previously accepted file is kept. Selecting a file after a finished
    /// run starts from a clean slate. While a run is in flight the selection
    /// is ignored.
    pub async fn select_file(&self, candidate: &MediaCandidate) -> UploadState {
        let outcome = validate_candidate(candidate);

        let mut state = self.state.lock().await;
        if state.phase.is_running() {
            tracing::debug!("Ignoring file selection while a run is in flight");
            return state.clone();
        }

        if state.phase.is_terminal() {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = UploadState::default();
        }

        match outcome {
            ValidationOutcome::Accepted(file) => {
                tracing::info!(
                    file = %file.name,
                    media_type = %file.media_type,
                    size = file.size,
                    "Media file selected"
                );
                state.file = Some(file);
                state.error = None;
            }
            ValidationOutcome::Rejected(reason) => {
                state.error = Some(reason);
            }
        }

        state.clone()
    }

    /// Return to the default state from any phase. Idempotent. An in-flight
    /// run keeps running but its continuations are discarded.
    pub async fn reset(&self) -> UploadState {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().await;
        *state = UploadState::default();
        tracing::debug!("Workflow reset");
        state.clone()
    }

    /// Drive one full run: encode, submit, analyze.
    ///
    /// No-ops (state unchanged) when a run is already in flight or no file is
    /// held. Returns the state the run ended in.
    pub async fn start_analysis(&self, progress: Option<ProgressSink>) -> UploadState {
        let (file, generation) = {
            let mut state = self.state.lock().await;
            if state.phase.is_running() {
                tracing::warn!("Analysis already in flight; ignoring start request");
                return state.clone();
            }
            let Some(file) = state.file.clone() else {
                tracing::debug!("No file selected; nothing to analyze");
                return state.clone();
            };

            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.phase = AnalysisPhase::Uploading;
            state.progress = 0;
            state.result = None;
            state.error = None;
            state.finished_at = None;
            (file, generation)
        };

        let mode = self.mode().await;
        let run_id = Uuid::new_v4();
        tracing::info!(
            run = %run_id,
            file = %file.name,
            mode = mode.as_str(),
            "Starting analysis run"
        );

        let sink = progress.as_ref();
        if self
            .advance(generation, AnalysisPhase::Uploading, 0, sink)
            .await
        {
            if let Err(err) = self.run_pipeline(&file, mode, generation, sink).await {
                self.fail(generation, &err, sink).await;
            }
        }

        self.snapshot().await
    }

    async fn run_pipeline(
        &self,
        file: &MediaFile,
        mode: AnalysisMode,
        generation: u64,
        sink: Option<&ProgressSink>,
    ) -> Result<(), RunError> {
        let payload = encode_media(file).await?;
        if !self
            .advance(generation, AnalysisPhase::Uploading, 25, sink)
            .await
        {
            return Ok(());
        }

        let receipt = self.backend.submit(&payload, &file.name, mode).await?;
        if !self
            .advance(generation, AnalysisPhase::Analyzing, 50, sink)
            .await
        {
            return Ok(());
        }

        let result = self
            .backend
            .analyze(&receipt.job_id, &receipt.public_url, mode)
            .await?;
        self.complete(generation, result, sink).await;
        Ok(())
    }

    /// Apply a progress checkpoint if this run is still the active generation.
    /// Returns false when the run has been superseded by a reset or new run.
    async fn advance(
        &self,
        generation: u64,
        phase: AnalysisPhase,
        progress: u8,
        sink: Option<&ProgressSink>,
    ) -> bool {
        {
            let mut state = self.state.lock().await;
            if self.generation.load(Ordering::SeqCst) != generation {
                tracing::debug!(generation, "Discarding stale progress update");
                return false;
            }
            state.phase = phase;
            state.progress = progress;
        }

        if let Some(sink) = sink {
            sink(ProgressUpdate { phase, progress });
        }
        true
    }

    async fn complete(
        &self,
        generation: u64,
        result: AnalysisResult,
        sink: Option<&ProgressSink>,
    ) {
        tracing::info!(
            job = %result.job_id,
            deepfake = result.is_deepfake,
            confidence = result.confidence,
            "Analysis complete"
        );

        {
            let mut state = self.state.lock().await;
            if self.generation.load(Ordering::SeqCst) != generation {
                tracing::debug!(generation, "Discarding stale analysis result");
                return;
            }
            state.phase = AnalysisPhase::Done;
            state.progress = 100;
            state.result = Some(result);
            state.error = None;
            state.finished_at = Some(Utc::now().timestamp_millis());
        }

        if let Some(sink) = sink {
            sink(ProgressUpdate {
                phase: AnalysisPhase::Done,
                progress: 100,
            });
        }
    }

    async fn fail(&self, generation: u64, err: &RunError, sink: Option<&ProgressSink>) {
        let message = err.message();

        {
            let mut state = self.state.lock().await;
            if self.generation.load(Ordering::SeqCst) != generation {
                tracing::debug!(generation, "Discarding stale failure");
                return;
            }
            tracing::warn!(error = %message, "Analysis run failed");
            state.phase = AnalysisPhase::Failed;
            state.progress = 0;
            state.result = None;
            state.error = Some(message);
            state.finished_at = Some(Utc::now().timestamp_millis());
        }

        if let Some(sink) = sink {
            sink(ProgressUpdate {
                phase: AnalysisPhase::Failed,
                progress: 0,
            });
        }
    }
}
