//! Rendering of analysis results into a displayable report

use crate::waveform::{self, WaveformStyle};
use image::{Rgba, RgbaImage};
use thiserror::Error;
use vitalscan_core::{AnalysisResult, VitalScanError};

/// Errors that can occur while rendering a result
#[derive(Error, Debug)]
pub enum RenderError {
    /// The analysis itself failed; carries the server-supplied message
    #[error("analysis failed: {message}")]
    AnalysisFailed {
        /// Server-supplied failure message
        message: String,
    },

    /// The waveform has too few samples to draw as a line
    #[error("waveform needs at least 2 samples, got {points}")]
    InsufficientData {
        /// Number of samples received
        points: usize,
    },

    /// The drawing surface has no area
    #[error("cannot render onto a {width}x{height} surface")]
    EmptySurface {
        /// Surface width
        width: u32,
        /// Surface height
        height: u32,
    },
}

impl From<RenderError> for VitalScanError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::AnalysisFailed { message } => VitalScanError::Analysis { message },
            other => VitalScanError::Rendering {
                reason: other.to_string(),
            },
        }
    }
}

/// Presentation bucket derived from the reported risk level.
///
/// Selected by string equality on the label, not by the numeric score; an
/// unrecognized label falls into the `High` bucket as a fail-safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    /// Low cardiovascular risk
    Low,
    /// Moderate cardiovascular risk
    Moderate,
    /// High (or unrecognized) cardiovascular risk
    High,
}

impl RiskTier {
    /// Select the tier for a reported risk level label
    pub fn from_level(level: &str) -> Self {
        match level {
            "Low" => RiskTier::Low,
            "Moderate" => RiskTier::Moderate,
            _ => RiskTier::High,
        }
    }

    /// Badge glyph for the tier
    pub fn badge(&self) -> &'static str {
        match self {
            RiskTier::Low => "\u{2705}",
            RiskTier::Moderate => "\u{26A0}\u{FE0F}",
            RiskTier::High => "\u{1F6A8}",
        }
    }

    /// Style class name for the tier
    pub fn style_class(&self) -> &'static str {
        match self {
            RiskTier::Low => "risk-low",
            RiskTier::Moderate => "risk-moderate",
            RiskTier::High => "risk-high",
        }
    }

    /// Accent color for the tier
    pub fn accent(&self) -> Rgba<u8> {
        match self {
            RiskTier::Low => Rgba([46, 204, 113, 255]),
            RiskTier::Moderate => Rgba([241, 196, 15, 255]),
            RiskTier::High => Rgba([231, 76, 60, 255]),
        }
    }
}

/// A fully rendered analysis report, ready for a display shell to present
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Heart rate in BPM, verbatim from the service
    pub heart_rate: f64,
    /// Heart rate variability in ms, verbatim from the service
    pub hrv: f64,
    /// Risk level label, verbatim from the service
    pub risk_level: String,
    /// Risk score (0-100), verbatim from the service
    pub risk_score: f64,
    /// Presentation tier for the risk level
    pub tier: RiskTier,
    /// Ordered recommendations; replaces any previous list wholesale
    pub recommendations: Vec<String>,
    /// Rasterized waveform chart
    pub waveform: RgbaImage,
}

/// Renders [`AnalysisResult`]s into [`ScanReport`]s
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    style: WaveformStyle,
}

impl ReportRenderer {
    /// Create a renderer with the given waveform style
    pub fn new(style: WaveformStyle) -> Self {
        Self { style }
    }

    /// Waveform style in use
    pub fn style(&self) -> &WaveformStyle {
        &self.style
    }

    /// Render one result.
    ///
    /// A `success: false` result short-circuits into
    /// [`RenderError::AnalysisFailed`] carrying the server's message;
    /// nothing is rendered in that case.
    pub fn render(&self, result: &AnalysisResult) -> Result<ScanReport, RenderError> {
        if !result.success {
            let message = result
                .error
                .clone()
                .unwrap_or_else(|| "analysis failed".to_string());
            return Err(RenderError::AnalysisFailed { message });
        }

        let waveform = waveform::render(&result.waveform_data, &self.style)?;
        Ok(ScanReport {
            heart_rate: result.heart_rate,
            hrv: result.hrv,
            risk_level: result.risk_level.clone(),
            risk_score: result.risk_score,
            tier: RiskTier::from_level(&result.risk_level),
            recommendations: result.recommendations.clone(),
            waveform,
        })
    }
}
