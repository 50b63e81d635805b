//! Scan session controller
//!
//! The state machine that ties capture, analysis, and rendering together.
//! One session exists per live stream; at most one scan cycle is active at a
//! time, whichever entry point started it.

use crate::config::SessionConfig;
use crate::event::{EventStream, SessionEvent};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use vitalscan_core::{
    AnalysisBackend, AnalysisClientConfig, AnalysisResult, CaptureLoop, Frame, FrameSource,
    HttpAnalysisClient, StreamHandle, VitalScanError,
};
use vitalscan_media::{ReportRenderer, ScanReport, WaveformStyle};

/// States of the session pipeline.
///
/// `Idle` is both the initial state and the resting state of every completed
/// cycle. A cycle runs `Capturing → Analyzing → Displaying` (or `Demoing →
/// Displaying`); `restart` forces `Idle` from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No cycle is active
    Idle,
    /// Sampling frames from the live source
    Capturing,
    /// Waiting on the analysis service
    Analyzing,
    /// Waiting on the canned demo analysis
    Demoing,
    /// A rendered report is on display
    Displaying,
}

impl SessionState {
    /// Whether a scan cycle is currently active
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            SessionState::Capturing | SessionState::Analyzing | SessionState::Demoing
        )
    }

    /// State name for logs and diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Capturing => "capturing",
            SessionState::Analyzing => "analyzing",
            SessionState::Demoing => "demoing",
            SessionState::Displaying => "displaying",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct SessionInner {
    source: Arc<dyn FrameSource>,
    backend: Arc<dyn AnalysisBackend>,
    renderer: ReportRenderer,
    config: SessionConfig,
    state: Mutex<SessionState>,
    frames: Mutex<Vec<Frame>>,
    report: Mutex<Option<Arc<ScanReport>>>,
    // Bumped by restart; a cycle whose snapshot of this counter has gone
    // stale must not touch session state or emit results.
    generation: AtomicU64,
    stream: StreamHandle,
    events: mpsc::UnboundedSender<SessionEvent>,
    event_stream: Mutex<Option<EventStream>>,
}

impl SessionInner {
    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    /// Claim the session for a new cycle. Returns the cycle's generation, or
    /// `None` when another cycle is already active.
    fn try_begin(&self, phase: SessionState) -> Option<u64> {
        let mut state = self.state.lock();
        if state.is_busy() {
            return None;
        }
        let generation = self.generation.load(Ordering::SeqCst);
        let from = *state;
        *state = phase;
        drop(state);
        debug!(from = %from, to = %phase, "scan cycle started");
        self.emit(SessionEvent::StateChanged { from, to: phase });
        Some(generation)
    }

    /// Move to the next phase unless the cycle has gone stale.
    fn advance(&self, generation: u64, to: SessionState) -> bool {
        let mut state = self.state.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        let from = *state;
        *state = to;
        drop(state);
        self.emit(SessionEvent::StateChanged { from, to });
        true
    }

    /// Publish the rendered report and enter `Displaying`, unless stale.
    fn complete(&self, generation: u64, report: ScanReport) -> bool {
        let report = Arc::new(report);
        let mut state = self.state.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        *self.report.lock() = Some(report.clone());
        let from = *state;
        *state = SessionState::Displaying;
        drop(state);
        self.emit(SessionEvent::StateChanged {
            from,
            to: SessionState::Displaying,
        });
        self.emit(SessionEvent::ReportReady { report });
        true
    }

    /// Surface a failure and return to `Idle`, unless stale.
    fn fail(&self, generation: u64, error: &VitalScanError) -> bool {
        let mut state = self.state.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        let from = *state;
        *state = SessionState::Idle;
        drop(state);
        self.emit(SessionEvent::StateChanged {
            from,
            to: SessionState::Idle,
        });
        self.emit(SessionEvent::SessionFailed {
            error: error.to_string(),
        });
        true
    }
}

/// The scan session pipeline.
///
/// Constructed once per live stream via [`SessionBuilder`]; clones share the
/// same session. Three triggers drive it: [`ScanSession::start`],
/// [`ScanSession::run_demo`], and [`ScanSession::restart`].
#[derive(Clone)]
pub struct ScanSession {
    inner: Arc<SessionInner>,
}

impl ScanSession {
    /// Start building a session
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Current pipeline state
    pub fn state(&self) -> SessionState {
        *self.inner.state.lock()
    }

    /// Number of frames currently held by the session
    pub fn frame_count(&self) -> usize {
        self.inner.frames.lock().len()
    }

    /// The report currently on display, if any
    pub fn current_report(&self) -> Option<Arc<ScanReport>> {
        self.inner.report.lock().clone()
    }

    /// Handle of the acquired live stream
    pub fn stream(&self) -> &StreamHandle {
        &self.inner.stream
    }

    /// Take the session's event stream.
    ///
    /// The stream can be taken once; later calls return `None`.
    pub fn events(&self) -> Option<EventStream> {
        self.inner.event_stream.lock().take()
    }

    /// Run one full scan cycle: capture for the configured window, submit
    /// the frames for analysis, render and display the result.
    ///
    /// Returns `Ok(false)` without doing anything when a cycle is already
    /// active (the single-flight guard), `Ok(true)` when the cycle ran to
    /// completion or was superseded by [`ScanSession::restart`], and the
    /// error after surfacing it when the cycle failed.
    pub async fn start(&self) -> Result<bool, VitalScanError> {
        let inner = &self.inner;
        let Some(generation) = inner.try_begin(SessionState::Capturing) else {
            debug!("a scan cycle is already active; ignoring start");
            return Ok(false);
        };
        inner.frames.lock().clear();

        let capture = CaptureLoop::new(inner.config.capture_window, inner.config.capture_interval);
        let captured = match capture.run(inner.source.as_ref(), &inner.frames).await {
            Ok(captured) => captured,
            Err(error) => return self.conclude_failure(generation, error),
        };
        if inner.generation.load(Ordering::SeqCst) == generation {
            inner.emit(SessionEvent::CaptureFinished { frames: captured });
            info!(frames = captured, "capture window closed");
        }

        if !inner.advance(generation, SessionState::Analyzing) {
            debug!(frames = captured, "session was reset during capture; discarding cycle");
            return Ok(true);
        }

        let frames = inner.frames.lock().clone();
        let outcome = inner.backend.analyze(&frames).await;
        self.conclude(generation, outcome)
    }

    /// Run the canned demo cycle.
    ///
    /// Shares the single-flight guard with [`ScanSession::start`]; return
    /// values have the same meaning.
    pub async fn run_demo(&self) -> Result<bool, VitalScanError> {
        let inner = &self.inner;
        let Some(generation) = inner.try_begin(SessionState::Demoing) else {
            debug!("a scan cycle is already active; ignoring demo request");
            return Ok(false);
        };
        let outcome = inner.backend.demo().await;
        self.conclude(generation, outcome)
    }

    /// Reset the session to `Idle` unconditionally.
    ///
    /// Hides the displayed report and clears the frame sequence. This is an
    /// abrupt reset, not a cancel: a capture or analysis still in flight
    /// keeps running, but its completion is recognized as stale and dropped
    /// silently.
    pub fn restart(&self) {
        let inner = &self.inner;
        let mut state = inner.state.lock();
        inner.generation.fetch_add(1, Ordering::SeqCst);
        let from = *state;
        *state = SessionState::Idle;
        drop(state);
        inner.frames.lock().clear();
        *inner.report.lock() = None;
        if from != SessionState::Idle {
            inner.emit(SessionEvent::StateChanged {
                from,
                to: SessionState::Idle,
            });
        }
        info!(from = %from, "session reset to idle");
    }

    fn conclude(
        &self,
        generation: u64,
        outcome: Result<AnalysisResult, VitalScanError>,
    ) -> Result<bool, VitalScanError> {
        let inner = &self.inner;
        let rendered =
            outcome.and_then(|result| inner.renderer.render(&result).map_err(VitalScanError::from));
        match rendered {
            Ok(report) => {
                if !inner.complete(generation, report) {
                    debug!("session was reset during analysis; dropping stale result");
                }
                Ok(true)
            }
            Err(error) => self.conclude_failure(generation, error),
        }
    }

    fn conclude_failure(
        &self,
        generation: u64,
        error: VitalScanError,
    ) -> Result<bool, VitalScanError> {
        if self.inner.fail(generation, &error) {
            warn!(error = %error, code = error.error_code(), "scan cycle failed");
            Err(error)
        } else {
            debug!(error = %error, "session was reset mid-cycle; dropping stale failure");
            Ok(true)
        }
    }
}

impl fmt::Debug for ScanSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanSession")
            .field("state", &self.state())
            .field("frames", &self.frame_count())
            .field("stream", &self.inner.stream)
            .finish()
    }
}

/// Fluent builder for scan sessions
pub struct SessionBuilder {
    source: Option<Arc<dyn FrameSource>>,
    backend: Option<Arc<dyn AnalysisBackend>>,
    config: SessionConfig,
    client_config: AnalysisClientConfig,
    style: WaveformStyle,
}

impl SessionBuilder {
    /// Create a builder with default timing and rendering settings
    pub fn new() -> Self {
        Self {
            source: None,
            backend: None,
            config: SessionConfig::default(),
            client_config: AnalysisClientConfig::default(),
            style: WaveformStyle::default(),
        }
    }

    /// Set the live frame source (required)
    pub fn frame_source(mut self, source: Arc<dyn FrameSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Inject an analysis backend directly, bypassing the HTTP client
    pub fn analysis_backend(mut self, backend: Arc<dyn AnalysisBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the analysis service base URL
    pub fn analysis_url(mut self, url: impl Into<String>) -> Self {
        self.client_config.base_url = url.into();
        self
    }

    /// Set the capture window length
    pub fn capture_window(mut self, window: Duration) -> Self {
        self.config.capture_window = window;
        self
    }

    /// Set the sampling cadence within the capture window
    pub fn capture_interval(mut self, interval: Duration) -> Self {
        self.config.capture_interval = interval;
        self
    }

    /// Set the minimum total latency of the demo path
    pub fn demo_pacing(mut self, pacing: Duration) -> Self {
        self.client_config.demo_pacing = pacing;
        self
    }

    /// Set the waveform chart style
    pub fn waveform_style(mut self, style: WaveformStyle) -> Self {
        self.style = style;
        self
    }

    /// Acquire the live stream and open the session.
    ///
    /// Camera failures surface here as
    /// [`VitalScanError::PermissionDenied`] or
    /// [`VitalScanError::DeviceUnavailable`].
    pub async fn open(self) -> Result<ScanSession, VitalScanError> {
        let source = self
            .source
            .ok_or_else(|| VitalScanError::MissingConfiguration {
                field: "frame_source".to_string(),
            })?;
        self.config.validate()?;

        let backend: Arc<dyn AnalysisBackend> = match self.backend {
            Some(backend) => backend,
            None => Arc::new(HttpAnalysisClient::new(self.client_config)?),
        };

        let stream = source.acquire().await?;
        info!(stream = %stream.description(), "live stream acquired");

        let (events, receiver) = mpsc::unbounded_channel();
        Ok(ScanSession {
            inner: Arc::new(SessionInner {
                source,
                backend,
                renderer: ReportRenderer::new(self.style),
                config: self.config,
                state: Mutex::new(SessionState::Idle),
                frames: Mutex::new(Vec::new()),
                report: Mutex::new(None),
                generation: AtomicU64::new(0),
                stream,
                events,
                event_stream: Mutex::new(Some(EventStream::new(receiver))),
            }),
        })
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
