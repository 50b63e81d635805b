//! Wire protocol for the analysis service
//!
//! Two endpoints, one response shape. `POST /analyze` takes the captured
//! frame sequence as data-URL strings; `GET /quick_demo` takes nothing.
//! Responses carry the vitals on success or `success: false` plus a message
//! on failure. Unknown response fields are ignored.

use crate::frame::Frame;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Prefix of an encoded frame on the wire
pub const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Encode one frame as a `data:image/jpeg;base64,` string
pub fn encode_frame(frame: &Frame) -> String {
    format!("{}{}", JPEG_DATA_URL_PREFIX, BASE64.encode(frame.data()))
}

/// Request body for `POST /analyze`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Captured frames in capture order, each a data-URL string
    pub video_data: Vec<String>,
}

impl AnalyzeRequest {
    /// Build the request body from a captured frame sequence
    pub fn from_frames(frames: &[Frame]) -> Self {
        Self {
            video_data: frames.iter().map(encode_frame).collect(),
        }
    }
}

fn success_by_default() -> bool {
    // The demo endpoint omits `success` entirely; only an explicit `false`
    // signals failure.
    true
}

/// Structured outcome of one analysis call.
///
/// `risk_level` and `risk_score` are reported independently by the service
/// and are never cross-validated locally. `waveform_data` values are
/// nominally 0-100; out-of-band values are clamped at render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Whether the analysis completed
    #[serde(default = "success_by_default")]
    pub success: bool,
    /// Failure message, present iff `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Estimated heart rate in BPM
    #[serde(default)]
    pub heart_rate: f64,
    /// Heart rate variability in ms
    #[serde(default)]
    pub hrv: f64,
    /// Risk classification label ("Low", "Moderate", "High")
    #[serde(default)]
    pub risk_level: String,
    /// Risk score on a 0-100 scale
    #[serde(default)]
    pub risk_score: f64,
    /// Ordered recommendation texts
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Waveform samples for the chart, nominally 0-100 each
    #[serde(default)]
    pub waveform_data: Vec<f64>,
}

impl AnalysisResult {
    /// Build a failure outcome with a message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            heart_rate: 0.0,
            hrv: 0.0,
            risk_level: String::new(),
            risk_score: 0.0,
            recommendations: Vec::new(),
            waveform_data: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_frame_produces_data_url() {
        let frame = Frame::new(vec![0xFF, 0xD8, 0xFF]);
        let encoded = encode_frame(&frame);
        assert!(encoded.starts_with(JPEG_DATA_URL_PREFIX));
        assert_eq!(&encoded[JPEG_DATA_URL_PREFIX.len()..], "/9j/");
    }

    #[test]
    fn test_request_preserves_frame_order() {
        let frames = vec![Frame::new(vec![1]), Frame::new(vec![2])];
        let request = AnalyzeRequest::from_frames(&frames);
        assert_eq!(request.video_data.len(), 2);
        assert_ne!(request.video_data[0], request.video_data[1]);
    }

    #[test]
    fn test_parse_success_response_with_extra_fields() {
        let body = r#"{
            "success": true,
            "heart_rate": 72,
            "hrv": 38,
            "risk_level": "Low",
            "risk_score": 24,
            "recommendations": ["Maintain regular physical activity"],
            "waveform_data": [48.0, 52.5, 50.0],
            "timestamp": "2024-05-01T10:00:00",
            "is_demo": true
        }"#;
        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert!(result.success);
        assert_eq!(result.heart_rate, 72.0);
        assert_eq!(result.risk_level, "Low");
        assert_eq!(result.waveform_data.len(), 3);
    }

    #[test]
    fn test_parse_failure_response_without_vitals() {
        let body = r#"{"success": false, "error": "no face detected"}"#;
        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("no face detected"));
        assert!(result.waveform_data.is_empty());
    }

    #[test]
    fn test_missing_success_field_means_success() {
        let body = r#"{"heart_rate": 70, "hrv": 30, "risk_level": "Moderate",
                       "risk_score": 45, "recommendations": [], "waveform_data": [1.0, 2.0]}"#;
        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert!(result.success);
    }
}
