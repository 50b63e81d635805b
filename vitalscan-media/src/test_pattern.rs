//! Synthetic frame source for tests, demos, and hardware-less environments

use crate::encode::encode_jpeg;
use async_trait::async_trait;
use image::{Rgb, RgbImage};
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use vitalscan_core::{Frame, FrameSource, StreamHandle, VitalScanError};

/// A [`FrameSource`] that renders a slowly shifting gradient.
///
/// Consecutive snapshots differ (the gradient phase advances per call), so
/// downstream code sees a live-looking stream. Deterministic unless noise is
/// enabled.
pub struct TestPatternSource {
    width: u32,
    height: u32,
    jpeg_quality: u8,
    noise: bool,
    snapshots: AtomicU64,
}

impl TestPatternSource {
    /// Create a 640x480 pattern source
    pub fn new() -> Self {
        Self::with_size(640, 480)
    }

    /// Create a pattern source with an explicit size
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            jpeg_quality: crate::camera::DEFAULT_JPEG_QUALITY,
            noise: false,
            snapshots: AtomicU64::new(0),
        }
    }

    /// Add per-pixel sensor-style noise to each snapshot
    pub fn with_noise(mut self) -> Self {
        self.noise = true;
        self
    }

    /// Number of snapshots taken so far
    pub fn snapshot_count(&self) -> u64 {
        self.snapshots.load(Ordering::SeqCst)
    }

    fn render(&self, phase: u64) -> RgbImage {
        let mut rng = rand::thread_rng();
        let shift = (phase % 256) as u32;
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let r = ((x + shift) % 256) as u8;
            let g = ((y + shift) % 256) as u8;
            let b = ((x + y) % 256) as u8;
            if self.noise {
                let jitter: u8 = rng.gen_range(0..8);
                Rgb([
                    r.saturating_add(jitter),
                    g.saturating_add(jitter),
                    b.saturating_add(jitter),
                ])
            } else {
                Rgb([r, g, b])
            }
        })
    }
}

impl Default for TestPatternSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FrameSource for TestPatternSource {
    async fn acquire(&self) -> Result<StreamHandle, VitalScanError> {
        Ok(StreamHandle::new(format!(
            "synthetic test pattern ({}x{})",
            self.width, self.height
        )))
    }

    async fn current_frame(&self) -> Result<Frame, VitalScanError> {
        let phase = self.snapshots.fetch_add(1, Ordering::SeqCst);
        encode_jpeg(&self.render(phase), self.jpeg_quality)
    }
}
