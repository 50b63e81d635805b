//! Live media source seam

use crate::error::VitalScanError;
use crate::frame::Frame;
use async_trait::async_trait;
use uuid::Uuid;

/// Opaque handle to an acquired live stream.
///
/// The handle lives as long as the source that produced it; the session only
/// stores it to witness that acquisition succeeded.
#[derive(Debug, Clone)]
pub struct StreamHandle {
    id: Uuid,
    description: String,
}

impl StreamHandle {
    /// Create a handle for a newly acquired stream
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
        }
    }

    /// Unique id of this acquisition
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Human-readable description of the underlying device
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A live video source that can be snapshotted on demand.
///
/// `current_frame` returns a fresh encoded snapshot of whatever the source
/// currently shows. It never waits for the device to produce a new camera
/// frame, so calling it faster than the device's own frame rate can yield
/// visually identical frames. That duplication is an accepted approximation.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Acquire the live stream.
    ///
    /// Fails with [`VitalScanError::PermissionDenied`] or
    /// [`VitalScanError::DeviceUnavailable`].
    async fn acquire(&self) -> Result<StreamHandle, VitalScanError>;

    /// Capture an encoded snapshot of the current picture.
    ///
    /// Callable at any time after [`FrameSource::acquire`] has succeeded.
    async fn current_frame(&self) -> Result<Frame, VitalScanError>;
}
