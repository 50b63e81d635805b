//! Live camera acquisition
//!
//! The camera device is owned by a dedicated worker thread; the async side
//! talks to it over a command channel. Device handles from the platform
//! capture layers are not reliably `Send`, and a single owning thread also
//! matches how the devices themselves want to be driven.

use crate::encode::encode_jpeg;
use async_trait::async_trait;
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution};
use nokhwa::{Camera, NokhwaError};
use parking_lot::Mutex;
use std::thread;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};
use vitalscan_core::{Frame, FrameSource, StreamHandle, VitalScanError};

/// Default JPEG quality for captured snapshots
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Camera acquisition configuration
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Platform device index
    pub device_index: u32,
    /// Requested capture width in pixels
    pub width: u32,
    /// Requested capture height in pixels
    pub height: u32,
    /// Requested device frame rate
    pub frame_rate: u32,
    /// JPEG quality used when encoding snapshots (1-100)
    pub jpeg_quality: u8,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device_index: 0,
            width: 640,
            height: 480,
            frame_rate: 30,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl CameraConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), VitalScanError> {
        if self.width == 0 || self.height == 0 {
            return Err(VitalScanError::InvalidConfiguration {
                message: "Invalid resolution".to_string(),
            });
        }
        if self.frame_rate == 0 || self.frame_rate > 120 {
            return Err(VitalScanError::InvalidConfiguration {
                message: "Invalid frame rate".to_string(),
            });
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(VitalScanError::InvalidConfiguration {
                message: "JPEG quality must be within 1-100".to_string(),
            });
        }
        Ok(())
    }

    fn device_label(&self) -> String {
        format!("camera {}", self.device_index)
    }
}

enum CameraCommand {
    Open {
        config: CameraConfig,
        reply: oneshot::Sender<Result<String, VitalScanError>>,
    },
    Snapshot {
        reply: oneshot::Sender<Result<Frame, VitalScanError>>,
    },
    Close,
}

/// Live camera [`FrameSource`] backed by nokhwa.
///
/// `current_frame` grabs whatever the device currently delivers and encodes
/// it as JPEG; it does not wait for a new device frame.
pub struct CameraSource {
    config: CameraConfig,
    commands: mpsc::UnboundedSender<CameraCommand>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    handle: Mutex<Option<StreamHandle>>,
}

impl CameraSource {
    /// Create a source for the given camera configuration.
    ///
    /// Spawns the worker thread; the device itself is not touched until
    /// [`FrameSource::acquire`].
    pub fn new(config: CameraConfig) -> Result<Self, VitalScanError> {
        config.validate()?;
        let (commands, command_rx) = mpsc::unbounded_channel();
        let worker = thread::Builder::new()
            .name("vitalscan-camera".to_string())
            .spawn(move || run_camera_worker(command_rx))
            .map_err(|err| VitalScanError::DeviceUnavailable {
                device: config.device_label(),
                reason: format!("failed to spawn capture worker: {err}"),
            })?;
        Ok(Self {
            config,
            commands,
            worker: Mutex::new(Some(worker)),
            handle: Mutex::new(None),
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Handle of the acquired stream, if acquisition has succeeded
    pub fn stream(&self) -> Option<StreamHandle> {
        self.handle.lock().clone()
    }

    fn worker_gone(&self) -> VitalScanError {
        VitalScanError::DeviceUnavailable {
            device: self.config.device_label(),
            reason: "capture worker stopped".to_string(),
        }
    }
}

#[async_trait]
impl FrameSource for CameraSource {
    async fn acquire(&self) -> Result<StreamHandle, VitalScanError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(CameraCommand::Open {
                config: self.config.clone(),
                reply,
            })
            .map_err(|_| self.worker_gone())?;
        let description = response.await.map_err(|_| self.worker_gone())??;

        let handle = StreamHandle::new(&description);
        info!(device = %description, "camera stream acquired");
        *self.handle.lock() = Some(handle.clone());
        Ok(handle)
    }

    async fn current_frame(&self) -> Result<Frame, VitalScanError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(CameraCommand::Snapshot { reply })
            .map_err(|_| self.worker_gone())?;
        response.await.map_err(|_| self.worker_gone())?
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        let _ = self.commands.send(CameraCommand::Close);
        if let Some(worker) = self.worker.lock().take() {
            let _ = worker.join();
        }
    }
}

fn run_camera_worker(mut commands: mpsc::UnboundedReceiver<CameraCommand>) {
    let mut camera: Option<Camera> = None;
    let mut quality = DEFAULT_JPEG_QUALITY;

    while let Some(command) = commands.blocking_recv() {
        match command {
            CameraCommand::Open { config, reply } => {
                quality = config.jpeg_quality;
                let result = open_camera(&config).map(|opened| {
                    let name = opened.info().human_name();
                    debug!(device = %name, "camera stream opened");
                    camera = Some(opened);
                    name
                });
                let _ = reply.send(result);
            }
            CameraCommand::Snapshot { reply } => {
                let result = match camera.as_mut() {
                    Some(device) => {
                        grab_snapshot(device).and_then(|snapshot| encode_jpeg(&snapshot, quality))
                    }
                    None => Err(VitalScanError::DeviceUnavailable {
                        device: "camera".to_string(),
                        reason: "stream not acquired".to_string(),
                    }),
                };
                let _ = reply.send(result);
            }
            CameraCommand::Close => break,
        }
    }

    if let Some(mut device) = camera.take() {
        let _ = device.stop_stream();
    }
}

fn open_camera(config: &CameraConfig) -> Result<Camera, VitalScanError> {
    let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
        CameraFormat::new(
            Resolution::new(config.width, config.height),
            FrameFormat::MJPEG,
            config.frame_rate,
        ),
    ));
    let mut camera = Camera::new(CameraIndex::Index(config.device_index), requested)
        .map_err(|err| classify_open_error(config, err))?;
    camera
        .open_stream()
        .map_err(|err| classify_open_error(config, err))?;
    Ok(camera)
}

fn grab_snapshot(camera: &mut Camera) -> Result<RgbImage, VitalScanError> {
    let buffer = camera.frame().map_err(|err| VitalScanError::FrameCapture {
        reason: err.to_string(),
    })?;
    let decoded = buffer
        .decode_image::<RgbFormat>()
        .map_err(|err| VitalScanError::FrameCapture {
            reason: err.to_string(),
        })?;
    let (width, height) = (decoded.width(), decoded.height());
    // Round-trip through the raw buffer: nokhwa decodes with its own image
    // crate version, which need not match the one used for encoding here.
    RgbImage::from_raw(width, height, decoded.into_raw()).ok_or_else(|| {
        VitalScanError::FrameCapture {
            reason: "snapshot buffer size mismatch".to_string(),
        }
    })
}

fn classify_open_error(config: &CameraConfig, err: NokhwaError) -> VitalScanError {
    // The platform layers fold authorization failures into generic open
    // errors, so permission problems are recognized by message.
    let reason = err.to_string();
    let lowered = reason.to_lowercase();
    if lowered.contains("permission") || lowered.contains("denied") || lowered.contains("authoriz") {
        VitalScanError::PermissionDenied { reason }
    } else {
        VitalScanError::DeviceUnavailable {
            device: config.device_label(),
            reason,
        }
    }
}
