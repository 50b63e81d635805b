//! Fixed-cadence frame capture loop

use crate::error::VitalScanError;
use crate::frame::Frame;
use crate::source::FrameSource;
use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Default sampling cadence: 10 Hz
pub const DEFAULT_CAPTURE_INTERVAL: Duration = Duration::from_millis(100);

/// Default capture window
pub const DEFAULT_CAPTURE_WINDOW: Duration = Duration::from_secs(10);

/// Samples a [`FrameSource`] at a fixed cadence for a fixed wall-clock window.
///
/// The stop condition is elapsed wall-clock time, not a tick count: under
/// load fewer than `window / interval` frames may be captured, and the loop
/// resolves no earlier than the window. A tick whose snapshot fails is
/// logged and skipped; capture continues.
#[derive(Debug, Clone, Copy)]
pub struct CaptureLoop {
    window: Duration,
    interval: Duration,
}

impl CaptureLoop {
    /// Create a loop for the given window and sampling interval
    pub fn new(window: Duration, interval: Duration) -> Self {
        Self { window, interval }
    }

    /// Capture window
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Sampling interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run the loop, appending each captured frame to `sink` in order.
    ///
    /// The first sample is taken immediately at invocation time. Resolves at
    /// the first tick at or after the window has elapsed, returning the
    /// number of frames appended.
    pub async fn run(
        &self,
        source: &dyn FrameSource,
        sink: &Mutex<Vec<Frame>>,
    ) -> Result<usize, VitalScanError> {
        let started = Instant::now();
        let mut ticker = tokio::time::interval(self.interval);
        let mut captured = 0usize;

        loop {
            ticker.tick().await;
            if started.elapsed() >= self.window {
                break;
            }
            match source.current_frame().await {
                Ok(frame) => {
                    sink.lock().push(frame);
                    captured += 1;
                }
                Err(err) => {
                    warn!(error = %err, "snapshot failed, skipping tick");
                }
            }
        }

        debug!(
            frames = captured,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "capture window closed"
        );
        Ok(captured)
    }
}

impl Default for CaptureLoop {
    fn default() -> Self {
        Self::new(DEFAULT_CAPTURE_WINDOW, DEFAULT_CAPTURE_INTERVAL)
    }
}
