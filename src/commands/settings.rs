//! Detection service credential commands

use crate::detection::CredentialStore;

/// Store the detection service API key in the OS keychain
#[tauri::command]
pub fn set_service_api_key(api_key: String) -> Result<(), String> {
    if api_key.trim().is_empty() {
        return Err("API key must not be empty".to_string());
    }
    CredentialStore::store_api_key(api_key.trim())
}

#[tauri::command]
pub fn has_service_api_key() -> bool {
    CredentialStore::has_api_key()
}

#[tauri::command]
pub fn clear_service_api_key() -> Result<(), String> {
    CredentialStore::delete_api_key()
}
