//! Pure rendering helpers for analysis results
//!
//! No control flow lives here; everything is a derivation from an
//! [`AnalysisResult`] that the webview displays directly.

use serde::Serialize;

use super::types::AnalysisResult;

/// Severity tier used to color the confidence readout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

/// One decimal place, e.g. `0.94 -> "94.0%"`
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

pub fn confidence_tier(confidence: f64) -> ConfidenceTier {
    if confidence >= 0.9 {
        ConfidenceTier::High
    } else if confidence >= 0.7 {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    }
}

/// `"face_landmarks" -> "face landmarks"`
pub fn humanize_label(label: &str) -> String {
    label.replace(['_', '-'], " ")
}

/// `2800 -> "2.8s"`
pub fn format_processing_time(ms: u64) -> String {
    format!("{:.1}s", ms as f64 / 1000.0)
}

pub fn format_file_size(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
}

pub fn verdict_headline(is_deepfake: bool) -> &'static str {
    if is_deepfake {
        "Potential Deepfake Detected"
    } else {
        "Authentic Content"
    }
}

/// Everything the results panel needs, derived from one verdict
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub headline: String,
    pub is_deepfake: bool,
    pub confidence_label: String,
    pub confidence_tier: ConfidenceTier,
    pub processing_time: String,
    pub scan_type: Option<String>,
    pub processing_method: Option<String>,
    pub features: Vec<String>,
    pub warnings: Vec<String>,
    pub status: String,
}

pub fn summarize(result: &AnalysisResult) -> ResultSummary {
    let details = &result.analysis_details;

    ResultSummary {
        headline: verdict_headline(result.is_deepfake).to_string(),
        is_deepfake: result.is_deepfake,
        confidence_label: format_confidence(result.confidence),
        confidence_tier: confidence_tier(result.confidence),
        processing_time: format_processing_time(result.processing_time_ms),
        scan_type: details.scan_type.as_deref().map(humanize_label),
        processing_method: details.processing_method.as_deref().map(humanize_label),
        features: details
            .features_analyzed
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|feature| humanize_label(feature))
            .collect(),
        warnings: details.warnings.clone().unwrap_or_default(),
        status: result.status.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::types::{AnalysisDetails, AnalysisResult};

    fn result_with(confidence: f64, details: AnalysisDetails) -> AnalysisResult {
        AnalysisResult {
            job_id: "j1".to_string(),
            is_deepfake: false,
            confidence,
            analysis_details: details,
            processing_time_ms: 2800,
            status: "complete".to_string(),
        }
    }

    #[test]
    fn formats_confidence_with_one_decimal() {
        assert_eq!(format_confidence(0.94), "94.0%");
        assert_eq!(format_confidence(1.0), "100.0%");
        assert_eq!(format_confidence(0.615), "61.5%");
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(confidence_tier(0.94), ConfidenceTier::High);
        assert_eq!(confidence_tier(0.9), ConfidenceTier::High);
        assert_eq!(confidence_tier(0.89), ConfidenceTier::Medium);
        assert_eq!(confidence_tier(0.7), ConfidenceTier::Medium);
        assert_eq!(confidence_tier(0.69), ConfidenceTier::Low);
    }

    #[test]
    fn humanizes_separator_characters() {
        assert_eq!(humanize_label("face_landmarks"), "face landmarks");
        assert_eq!(humanize_label("frame-consistency"), "frame consistency");
        assert_eq!(humanize_label("basic"), "basic");
    }

    #[test]
    fn formats_processing_time_and_file_size() {
        assert_eq!(format_processing_time(2800), "2.8s");
        assert_eq!(format_processing_time(450), "0.5s");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2.0 MB");
    }

    #[test]
    fn summary_tolerates_absent_detail_fields() {
        let summary = summarize(&result_with(0.94, AnalysisDetails::default()));

        assert_eq!(summary.headline, "Authentic Content");
        assert_eq!(summary.confidence_label, "94.0%");
        assert_eq!(summary.confidence_tier, ConfidenceTier::High);
        assert_eq!(summary.processing_time, "2.8s");
        assert!(summary.scan_type.is_none());
        assert!(summary.features.is_empty());
        assert!(summary.warnings.is_empty());
    }

    #[test]
    fn summary_humanizes_details() {
        let details = AnalysisDetails {
            scan_type: Some("quick_scan".to_string()),
            processing_method: Some("basic".to_string()),
            features_analyzed: Some(vec!["face_landmarks".to_string()]),
            warnings: Some(vec!["low light".to_string()]),
        };

        let summary = summarize(&result_with(0.72, details));
        assert_eq!(summary.scan_type.as_deref(), Some("quick scan"));
        assert_eq!(summary.features, vec!["face landmarks"]);
        assert_eq!(summary.warnings, vec!["low light"]);
        assert_eq!(summary.confidence_tier, ConfidenceTier::Medium);
    }

    #[test]
    fn deepfake_verdict_headline() {
        let mut result = result_with(0.97, AnalysisDetails::default());
        result.is_deepfake = true;
        assert_eq!(summarize(&result).headline, "Potential Deepfake Detected");
    }
}
