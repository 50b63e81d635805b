//! Core capture pipeline and analysis transport for VitalScan
//!
//! This crate holds everything below the session controller: the frame and
//! stream types, the fixed-cadence capture loop, the analysis wire protocol,
//! and the HTTP transport to the analysis service.

pub mod analysis;
pub mod capture;
pub mod error;
pub mod frame;
pub mod source;
pub mod wire;

pub use analysis::{
    AnalysisBackend, AnalysisClientConfig, HttpAnalysisClient, DEFAULT_DEMO_PACING,
    DEFAULT_REQUEST_TIMEOUT,
};
pub use capture::{CaptureLoop, DEFAULT_CAPTURE_INTERVAL, DEFAULT_CAPTURE_WINDOW};
pub use error::VitalScanError;
pub use frame::Frame;
pub use source::{FrameSource, StreamHandle};
pub use wire::{AnalysisResult, AnalyzeRequest};
