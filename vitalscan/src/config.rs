//! Session configuration and defaults

use std::time::Duration;
use vitalscan_core::{VitalScanError, DEFAULT_CAPTURE_INTERVAL, DEFAULT_CAPTURE_WINDOW};

/// Timing configuration for one scan session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Wall-clock length of the capture window
    pub capture_window: Duration,
    /// Sampling cadence within the window
    pub capture_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capture_window: DEFAULT_CAPTURE_WINDOW,
            capture_interval: DEFAULT_CAPTURE_INTERVAL,
        }
    }
}

impl SessionConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), VitalScanError> {
        if self.capture_interval.is_zero() {
            return Err(VitalScanError::InvalidConfiguration {
                message: "capture interval must be non-zero".to_string(),
            });
        }
        if self.capture_window < self.capture_interval {
            return Err(VitalScanError::InvalidConfiguration {
                message: "capture window must cover at least one interval".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_ten_seconds_at_ten_hertz() {
        let config = SessionConfig::default();
        assert_eq!(config.capture_window, Duration::from_secs(10));
        assert_eq!(config.capture_interval, Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let config = SessionConfig {
            capture_interval: Duration::ZERO,
            ..SessionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_window_shorter_than_interval_is_rejected() {
        let config = SessionConfig {
            capture_window: Duration::from_millis(50),
            capture_interval: Duration::from_millis(100),
        };
        assert!(config.validate().is_err());
    }
}
