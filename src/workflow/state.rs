//! Workflow state shared with the webview

use serde::{Deserialize, Serialize};

use crate::detection::AnalysisResult;
use crate::media::MediaFile;

/// Discrete stage of a single analysis run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisPhase {
    #[default]
    Idle,
    Uploading,
    Analyzing,
    Done,
    Failed,
}

impl AnalysisPhase {
    /// A run is in flight; no new run or file selection may start
    pub fn is_running(&self) -> bool {
        matches!(self, AnalysisPhase::Uploading | AnalysisPhase::Analyzing)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisPhase::Done | AnalysisPhase::Failed)
    }
}

/// Snapshot of the upload/analysis workflow, rendered directly by the webview.
///
/// `result` and `error` are never set at the same time; `progress` only moves
/// forward within a run and returns to 0 on reset or failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadState {
    pub file: Option<MediaFile>,
    pub phase: AnalysisPhase,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the run reached a terminal phase (unix ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<i64>,
}
