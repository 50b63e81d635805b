//! # VitalScan - Camera-Based Vitals Screening Pipeline
//!
//! VitalScan drives an interactive "capture vitals from a camera, send for
//! analysis, render results" session: it samples a live video source at
//! 10 Hz for a fixed window, submits the captured frames to a remote
//! analysis service in one request, and renders the returned physiological
//! report, including a rasterized pulse waveform chart.
//!
//! ## Key properties
//!
//! - **Single-flight**: at most one scan cycle is active at a time,
//!   whichever trigger started it
//! - **Abrupt restart**: resetting never cancels in-flight work; stale
//!   completions are recognized and dropped silently
//! - **Injected collaborators**: the frame source and analysis backend are
//!   trait objects, so tests and demos substitute fakes freely
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vitalscan::{ScanSession, TestPatternSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vitalscan::VitalScanError> {
//!     let session = ScanSession::builder()
//!         .frame_source(Arc::new(TestPatternSource::new()))
//!         .analysis_url("http://127.0.0.1:5000")
//!         .open()
//!         .await?;
//!
//!     let mut events = session.events().expect("event stream already taken");
//!     session.start().await?;
//!
//!     while let Ok(Some(event)) = events.try_next() {
//!         println!("session event: {}", event.event_type());
//!     }
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export pipeline types for easy access
pub use vitalscan_core::{
    AnalysisBackend, AnalysisClientConfig, AnalysisResult, AnalyzeRequest, CaptureLoop, Frame,
    FrameSource, HttpAnalysisClient, StreamHandle, VitalScanError,
};

pub use vitalscan_media::{
    CameraConfig, CameraSource, RenderError, ReportRenderer, RiskTier, ScanReport,
    TestPatternSource, WaveformStyle,
};

// Chart rasterizer, usable standalone
pub use vitalscan_media::waveform;

// Public API modules
pub mod config;
pub mod event;
pub mod session;

// Re-export main API types
pub use config::SessionConfig;
pub use event::{EventStream, SessionEvent};
pub use session::{ScanSession, SessionBuilder, SessionState};
