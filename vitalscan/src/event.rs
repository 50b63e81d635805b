//! Event system for session observation

use crate::session::SessionState;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use vitalscan_media::ScanReport;

/// Events emitted by a scan session over its lifetime
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The session moved to a new state
    StateChanged {
        /// State the session left
        from: SessionState,
        /// State the session entered
        to: SessionState,
    },
    /// The capture window closed
    CaptureFinished {
        /// Number of frames captured in the window
        frames: usize,
    },
    /// A report was rendered and is on display
    ReportReady {
        /// The rendered report
        report: Arc<ScanReport>,
    },
    /// The cycle failed; this is the single user-visible notification
    SessionFailed {
        /// Failure description to show the user
        error: String,
    },
}

impl SessionEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::StateChanged { .. } => "state_changed",
            SessionEvent::CaptureFinished { .. } => "capture_finished",
            SessionEvent::ReportReady { .. } => "report_ready",
            SessionEvent::SessionFailed { .. } => "session_failed",
        }
    }

    /// Check if this is a failure event
    pub fn is_failure(&self) -> bool {
        matches!(self, SessionEvent::SessionFailed { .. })
    }
}

/// Stream of session events for async iteration
#[derive(Debug)]
pub struct EventStream {
    receiver: mpsc::UnboundedReceiver<SessionEvent>,
}

impl EventStream {
    /// Create a new event stream over a receiver
    pub fn new(receiver: mpsc::UnboundedReceiver<SessionEvent>) -> Self {
        Self { receiver }
    }

    /// Get the next event from the stream
    pub async fn next(&mut self) -> Option<SessionEvent> {
        self.receiver.recv().await
    }

    /// Try to get the next event without blocking
    pub fn try_next(&mut self) -> Result<Option<SessionEvent>, mpsc::error::TryRecvError> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => {
                Err(mpsc::error::TryRecvError::Disconnected)
            }
        }
    }

    /// Close the event stream
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

impl futures::Stream for EventStream {
    type Item = SessionEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}
