//! File selection commands

use std::path::Path;

use tauri::State;

use super::analysis::WorkflowState;
use crate::media::MediaCandidate;
use crate::workflow::UploadState;

/// Register a picked or dropped file with the workflow.
///
/// `declared_type` comes from the browser drop event when available; for
/// dialog picks it is absent and the type is inferred from the extension.
/// An unsupported type is reported inside the returned state, not as a
/// command error.
#[tauri::command]
pub async fn select_media_file(
    path: String,
    declared_type: Option<String>,
    state: State<'_, WorkflowState>,
) -> Result<UploadState, String> {
    let candidate = MediaCandidate::from_path(Path::new(&path), declared_type)?;
    Ok(state.0.select_file(&candidate).await)
}
