//! Captured frame representation

use bytes::Bytes;
use std::fmt;

/// One encoded snapshot sampled from the live source.
///
/// A frame is a compressed raster byte sequence (JPEG). Its only position in
/// time is its index in the session's frame sequence; no capture timestamp is
/// retained. Frames are immutable once captured.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    data: Bytes,
}

impl Frame {
    /// Create a frame from encoded raster bytes
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Encoded payload
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size of the encoded payload in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the frame carries no data
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the frame, returning its payload
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The payload is compressed image data; print its size, not its bytes.
        f.debug_struct("Frame").field("len", &self.data.len()).finish()
    }
}
