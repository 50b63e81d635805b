//! Camera acquisition and result rendering for VitalScan
//!
//! The two media-facing ends of the pipeline: acquiring encoded snapshots
//! from a live camera (or a synthetic stand-in), and rasterizing the
//! analysis result into a displayable report with its waveform chart.

pub mod camera;
pub mod encode;
pub mod render;
pub mod test_pattern;
pub mod waveform;

pub use camera::{CameraConfig, CameraSource, DEFAULT_JPEG_QUALITY};
pub use encode::encode_jpeg;
pub use render::{RenderError, ReportRenderer, RiskTier, ScanReport};
pub use test_pattern::TestPatternSource;
pub use waveform::{plot_points, WaveformStyle};
