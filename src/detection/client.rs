//! Detection service client
//!
//! Handles the two-phase exchange with the remote analysis pipeline:
//! ingest (submit) followed by processing (analyze). The second call is
//! only ever made with identifiers returned by a successful first call;
//! that ordering is enforced by the workflow controller.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::credentials::CredentialStore;
use super::http_client::detection_client;
use super::types::{AnalysisMode, AnalysisResult, SubmitReceipt};
use crate::media::EncodedMedia;

const DEFAULT_BASE_URL: &str = "https://api.deepguard.dev";
const SUBMIT_PATH: &str = "/functions/v1/deepfake-upload";
const ANALYZE_PATH: &str = "/functions/v1/deepfake-analysis";

#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    /// Error envelope returned by the service; the message is surfaced verbatim
    #[error("{0}")]
    Remote(String),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The two sequential remote operations of the analysis pipeline
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Send the encoded media for ingestion; returns the job identifiers
    async fn submit(
        &self,
        payload: &EncodedMedia,
        file_name: &str,
        mode: AnalysisMode,
    ) -> Result<SubmitReceipt, DetectionError>;

    /// Run detection on a previously submitted job
    async fn analyze(
        &self,
        job_id: &str,
        file_url: &str,
        mode: AnalysisMode,
    ) -> Result<AnalysisResult, DetectionError>;
}

/// Connection settings for the detection service
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl DetectionConfig {
    /// Read settings from the environment, falling back to the stored credential
    pub fn from_env() -> Self {
        let base_url = std::env::var("DEEPGUARD_API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url,
            api_key: CredentialStore::get_api_key().ok(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitRequest<'a> {
    file_data: &'a str,
    file_name: &'a str,
    analysis_type: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest<'a> {
    job_id: &'a str,
    file_url: &'a str,
    analysis_type: &'a str,
}

/// Error envelope from the service. Some deployments nest the message.
#[derive(Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl ErrorEnvelope {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.error.map(|detail| detail.message))
            .filter(|message| !message.is_empty())
    }
}

/// HTTP implementation of [`AnalysisBackend`]
pub struct DetectionClient {
    client: &'static reqwest::Client,
    config: DetectionConfig,
}

impl DetectionClient {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            client: detection_client(),
            config,
        }
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DetectionError> {
        let mut request = self
            .client
            .post(format!("{}{}", self.config.base_url, path))
            .header("content-type", "application/json")
            .json(body);

        if let Some(key) = &self.config.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if let Some(message) = serde_json::from_str::<ErrorEnvelope>(&text)
                .ok()
                .and_then(ErrorEnvelope::into_message)
            {
                return Err(DetectionError::Remote(message));
            }
            return Err(DetectionError::Remote(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        response.json::<T>().await.map_err(DetectionError::from)
    }
}

#[async_trait]
impl AnalysisBackend for DetectionClient {
    async fn submit(
        &self,
        payload: &EncodedMedia,
        file_name: &str,
        mode: AnalysisMode,
    ) -> Result<SubmitReceipt, DetectionError> {
        tracing::debug!(
            file = file_name,
            mode = mode.as_str(),
            bytes = payload.byte_len,
            "Submitting media for analysis"
        );

        self.post_json(
            SUBMIT_PATH,
            &SubmitRequest {
                file_data: &payload.data_uri,
                file_name,
                analysis_type: mode.as_str(),
            },
        )
        .await
    }

    async fn analyze(
        &self,
        job_id: &str,
        file_url: &str,
        mode: AnalysisMode,
    ) -> Result<AnalysisResult, DetectionError> {
        tracing::debug!(job = job_id, mode = mode.as_str(), "Requesting analysis");

        self.post_json(
            ANALYZE_PATH,
            &AnalyzeRequest {
                job_id,
                file_url,
                analysis_type: mode.as_str(),
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_message_is_verbatim() {
        let err = DetectionError::Remote("storage quota exceeded".to_string());
        assert_eq!(err.to_string(), "storage quota exceeded");
    }

    #[test]
    fn parses_both_error_envelope_shapes() {
        let flat: ErrorEnvelope = serde_json::from_str(r#"{"message":"quota exceeded"}"#).unwrap();
        assert_eq!(flat.into_message().as_deref(), Some("quota exceeded"));

        let nested: ErrorEnvelope =
            serde_json::from_str(r#"{"error":{"message":"bad payload"}}"#).unwrap();
        assert_eq!(nested.into_message().as_deref(), Some("bad payload"));

        let empty: ErrorEnvelope = serde_json::from_str(r#"{"message":""}"#).unwrap();
        assert!(empty.into_message().is_none());
    }

    #[test]
    fn submit_request_uses_service_field_names() {
        let request = SubmitRequest {
            file_data: "data:image/jpeg;base64,xx",
            file_name: "face.jpg",
            analysis_type: AnalysisMode::QuickScan.as_str(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["fileData"], "data:image/jpeg;base64,xx");
        assert_eq!(value["fileName"], "face.jpg");
        assert_eq!(value["analysisType"], "quick_scan");
    }

    #[test]
    fn analyze_request_uses_service_field_names() {
        let request = AnalyzeRequest {
            job_id: "j1",
            file_url: "https://x/j1",
            analysis_type: AnalysisMode::FullAnalysis.as_str(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["jobId"], "j1");
        assert_eq!(value["fileUrl"], "https://x/j1");
        assert_eq!(value["analysisType"], "full_analysis");
    }
}
