//! Wire types shared with the detection service

use serde::{Deserialize, Serialize};

/// Analysis depth requested by the user. Persists across workflow resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    #[default]
    QuickScan,
    FullAnalysis,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::QuickScan => "quick_scan",
            AnalysisMode::FullAnalysis => "full_analysis",
        }
    }
}

/// Identifiers issued by the submit endpoint and consumed by analyze
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    pub job_id: String,
    pub public_url: String,
}

/// Structured metadata reported alongside a verdict.
/// Every field is optional; the service omits what a scan did not produce.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features_analyzed: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

/// Final verdict from the detection service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub job_id: String,
    pub is_deepfake: bool,
    /// Model confidence in [0, 1]
    pub confidence: f64,
    #[serde(default)]
    pub analysis_details: AnalysisDetails,
    pub processing_time_ms: u64,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_uses_service_wire_strings() {
        assert_eq!(AnalysisMode::QuickScan.as_str(), "quick_scan");
        assert_eq!(
            serde_json::to_string(&AnalysisMode::FullAnalysis).unwrap(),
            "\"full_analysis\""
        );
        let parsed: AnalysisMode = serde_json::from_str("\"quick_scan\"").unwrap();
        assert_eq!(parsed, AnalysisMode::QuickScan);
    }

    #[test]
    fn parses_service_result_payload() {
        let json = r#"{
            "jobId": "j1",
            "isDeepfake": false,
            "confidence": 0.94,
            "analysisDetails": {
                "scan_type": "quick_scan",
                "processing_method": "basic",
                "features_analyzed": ["face_landmarks"],
                "warnings": []
            },
            "processingTimeMs": 2800,
            "status": "complete"
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.job_id, "j1");
        assert!(!result.is_deepfake);
        assert_eq!(result.processing_time_ms, 2800);
        assert_eq!(
            result.analysis_details.features_analyzed.as_deref(),
            Some(&["face_landmarks".to_string()][..])
        );
    }

    #[test]
    fn tolerates_missing_detail_fields() {
        let json = r#"{
            "jobId": "j2",
            "isDeepfake": true,
            "confidence": 0.61,
            "processingTimeMs": 9100,
            "status": "complete"
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.analysis_details, AnalysisDetails::default());
        assert!(result.analysis_details.warnings.is_none());
    }
}
