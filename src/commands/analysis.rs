//! Analysis workflow commands
//!
//! Thin wrappers over [`WorkflowController`]; the webview drives the run
//! through these and listens for `analysis-progress` events in between.

use std::sync::Arc;

use tauri::{AppHandle, Emitter, State};

use crate::detection::{summarize, AnalysisMode, ResultSummary};
use crate::workflow::{ProgressSink, ProgressUpdate, UploadState, WorkflowController};

/// Event carrying a [`ProgressUpdate`] payload
pub const PROGRESS_EVENT: &str = "analysis-progress";

/// Managed handle to the single workflow instance
pub struct WorkflowState(pub Arc<WorkflowController>);

/// Run the full encode/submit/analyze sequence for the selected file.
/// Resolves with the terminal state; progress is emitted as events.
#[tauri::command]
pub async fn start_analysis(
    app: AppHandle,
    state: State<'_, WorkflowState>,
) -> Result<UploadState, String> {
    let sink: ProgressSink = Box::new(move |update: ProgressUpdate| {
        let _ = app.emit(PROGRESS_EVENT, &update);
    });

    Ok(state.0.start_analysis(Some(sink)).await)
}

/// Clear the workflow back to its default state
#[tauri::command]
pub async fn reset_analysis(state: State<'_, WorkflowState>) -> Result<UploadState, String> {
    Ok(state.0.reset().await)
}

/// Current workflow snapshot (used by the webview to re-sync after reload)
#[tauri::command]
pub async fn get_upload_state(state: State<'_, WorkflowState>) -> Result<UploadState, String> {
    Ok(state.0.snapshot().await)
}

/// Render-ready summary of the last verdict, if any
#[tauri::command]
pub async fn get_result_summary(
    state: State<'_, WorkflowState>,
) -> Result<Option<ResultSummary>, String> {
    Ok(state.0.snapshot().await.result.as_ref().map(summarize))
}

#[tauri::command]
pub async fn set_analysis_mode(
    mode: AnalysisMode,
    state: State<'_, WorkflowState>,
) -> Result<(), String> {
    state.0.set_mode(mode).await;
    Ok(())
}

#[tauri::command]
pub async fn get_analysis_mode(state: State<'_, WorkflowState>) -> Result<AnalysisMode, String> {
    Ok(state.0.mode().await)
}
