//! Service credential storage
//!
//! Lookup order for the detection service API key: environment variable,
//! OS keychain, then a plain-file fallback that only exists in dev builds.

use keyring::Entry;

const SERVICE_NAME: &str = "com.deepguard.app";
const KEY_NAME: &str = "detection-service";

/// Environment variable consulted before any stored credential
pub const API_KEY_ENV: &str = "DEEPGUARD_API_KEY";

pub struct CredentialStore;

impl CredentialStore {
    #[cfg(debug_assertions)]
    fn fallback_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|dir| dir.join("deepguard").join("service_key"))
    }

    /// Store the API key in the keychain (file fallback in dev builds)
    pub fn store_api_key(api_key: &str) -> Result<(), String> {
        match Entry::new(SERVICE_NAME, KEY_NAME) {
            Ok(entry) => {
                if entry.set_password(api_key).is_ok() {
                    tracing::debug!("Stored service key in keychain");
                    return Ok(());
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "Keychain unavailable");
            }
        }

        #[cfg(debug_assertions)]
        {
            if let Some(path) = Self::fallback_path() {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| format!("Failed to create config directory: {}", e))?;
                }
                std::fs::write(&path, api_key)
                    .map_err(|e| format!("Failed to write service key: {}", e))?;
                tracing::warn!(path = %path.display(), "DEV MODE: stored service key on disk");
                return Ok(());
            }
        }

        Err("Secure credential storage (keychain) unavailable".to_string())
    }

    pub fn get_api_key() -> Result<String, String> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                return Ok(key);
            }
        }

        if let Ok(entry) = Entry::new(SERVICE_NAME, KEY_NAME) {
            if let Ok(key) = entry.get_password() {
                return Ok(key);
            }
        }

        #[cfg(debug_assertions)]
        {
            if let Some(path) = Self::fallback_path() {
                if let Ok(key) = std::fs::read_to_string(&path) {
                    let key = key.trim().to_string();
                    if !key.is_empty() {
                        return Ok(key);
                    }
                }
            }
        }

        Err(format!(
            "No detection service API key configured (set {} or store one)",
            API_KEY_ENV
        ))
    }

    pub fn has_api_key() -> bool {
        Self::get_api_key().is_ok()
    }

    pub fn delete_api_key() -> Result<(), String> {
        if let Ok(entry) = Entry::new(SERVICE_NAME, KEY_NAME) {
            let _ = entry.delete_credential();
        }

        #[cfg(debug_assertions)]
        {
            if let Some(path) = Self::fallback_path() {
                if path.exists() {
                    std::fs::remove_file(&path)
                        .map_err(|e| format!("Failed to delete service key: {}", e))?;
                }
            }
        }

        Ok(())
    }
}
