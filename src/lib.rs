mod commands;
mod detection;
mod media;
mod workflow;

use std::sync::Arc;

use commands::*;
use detection::{DetectionClient, DetectionConfig};
use tracing_subscriber::EnvFilter;
use workflow::WorkflowController;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Load .env file - during `tauri dev`, CWD is the project root
    if dotenvy::dotenv().is_err() {
        let _ = dotenvy::from_path("../.env");
    }

    // Initialize tracing with RUST_LOG env filter
    // Use RUST_LOG=debug for per-transition logs
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,deepguard_lib=info")),
        )
        .init();

    let client = DetectionClient::new(DetectionConfig::from_env());
    let workflow_state = WorkflowState(Arc::new(WorkflowController::new(Arc::new(client))));

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_fs::init())
        .plugin(tauri_plugin_dialog::init())
        .manage(workflow_state)
        .invoke_handler(tauri::generate_handler![
            // File selection
            select_media_file,
            // Analysis workflow
            start_analysis,
            reset_analysis,
            get_upload_state,
            get_result_summary,
            set_analysis_mode,
            get_analysis_mode,
            // Service credentials
            set_service_api_key,
            has_service_api_key,
            clear_service_api_key,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
