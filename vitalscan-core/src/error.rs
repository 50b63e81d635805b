//! Error types for VitalScan

use thiserror::Error;

/// Main error type for VitalScan operations
#[derive(Error, Debug)]
pub enum VitalScanError {
    /// Camera access was denied by the platform or the user
    #[error("Camera permission denied: {reason}")]
    PermissionDenied {
        /// Reason reported by the capture backend
        reason: String,
    },

    /// Camera device could not be opened or disappeared
    #[error("Camera unavailable ({device}): {reason}")]
    DeviceUnavailable {
        /// Device that was requested
        device: String,
        /// Reason reported by the capture backend
        reason: String,
    },

    /// A snapshot could not be read from the live stream
    #[error("Frame capture failed: {reason}")]
    FrameCapture {
        /// Reason for the capture failure
        reason: String,
    },

    /// Raster encoding of a snapshot failed
    #[error("Frame encoding failed: {reason}")]
    Encoding {
        /// Reason for the encoding failure
        reason: String,
    },

    /// The analysis round trip did not complete with a success response
    #[error("Network error: {reason}")]
    Network {
        /// Transport or HTTP failure description
        reason: String,
    },

    /// The analysis service completed but reported a failure
    #[error("Analysis failed: {message}")]
    Analysis {
        /// Server-supplied failure message
        message: String,
    },

    /// A result could not be rendered for display
    #[error("Rendering failed: {reason}")]
    Rendering {
        /// Reason for the rendering failure
        reason: String,
    },

    /// Missing required configuration
    #[error("Missing required configuration: {field}")]
    MissingConfiguration {
        /// Missing configuration field
        field: String,
    },

    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },
}

impl VitalScanError {
    /// Get error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            VitalScanError::PermissionDenied { .. } => "PERMISSION_DENIED",
            VitalScanError::DeviceUnavailable { .. } => "DEVICE_UNAVAILABLE",
            VitalScanError::FrameCapture { .. } => "FRAME_CAPTURE_FAILED",
            VitalScanError::Encoding { .. } => "ENCODING_FAILED",
            VitalScanError::Network { .. } => "NETWORK_ERROR",
            VitalScanError::Analysis { .. } => "ANALYSIS_FAILED",
            VitalScanError::Rendering { .. } => "RENDERING_FAILED",
            VitalScanError::MissingConfiguration { .. } => "MISSING_CONFIGURATION",
            VitalScanError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
        }
    }

    /// Check if the user can reasonably retry the operation that failed
    pub fn is_recoverable(&self) -> bool {
        match self {
            VitalScanError::Network { .. } => true,
            VitalScanError::Analysis { .. } => true,
            VitalScanError::FrameCapture { .. } => true,
            VitalScanError::DeviceUnavailable { .. } => true,
            VitalScanError::PermissionDenied { .. } => false,
            VitalScanError::Encoding { .. } => false,
            VitalScanError::Rendering { .. } => false,
            VitalScanError::MissingConfiguration { .. } => false,
            VitalScanError::InvalidConfiguration { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = VitalScanError::DeviceUnavailable {
            device: "camera 0".to_string(),
            reason: "no such device".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Camera unavailable (camera 0): no such device"
        );
    }

    #[test]
    fn test_error_codes_and_recoverability() {
        let network = VitalScanError::Network {
            reason: "connection refused".to_string(),
        };
        assert_eq!(network.error_code(), "NETWORK_ERROR");
        assert!(network.is_recoverable());

        let denied = VitalScanError::PermissionDenied {
            reason: "not authorized".to_string(),
        };
        assert_eq!(denied.error_code(), "PERMISSION_DENIED");
        assert!(!denied.is_recoverable());
    }
}
