//! Single-client session loop
//!
//! A [`Session`] lives for exactly one accepted connection. Every iteration
//! it:
//!
//! 1. reads the pressure source once,
//! 2. sends one telemetry frame,
//! 3. checks for inbound bytes without waiting, and
//! 4. decodes and dispatches at most one command line.
//!
//! The caller paces iterations (see [`crate::bridge::Bridge::serve`]). The
//! session ends when the peer closes the connection or a transmit fails; both
//! are normal lifecycle events for the listener, not process errors.

use core::ops::ControlFlow;

use log::{debug, error, info, warn};

use crate::acquisition::AcquisitionState;
use crate::command::{Command, first_line};
use crate::config::RX_CAPACITY;
use crate::dispatch::dispatch;
use crate::indicator::Indicator;
use crate::sensor::PressureSource;
use crate::telemetry::format_frame;

/// Outcome of a non-blocking receive attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Received {
    /// No bytes are available right now
    Nothing,
    /// This many bytes were written to the front of the buffer
    Data(usize),
    /// The peer performed an orderly close
    Closed,
}

/// Transport carrying one session.
pub trait Link {
    /// Kept by the session after a failed transmit, hence `Clone`
    type Error: core::fmt::Debug + Clone;

    /// Send all of `bytes`.
    fn send(&mut self, bytes: &[u8]) -> impl Future<Output = Result<(), Self::Error>>;

    /// Copy whatever is already buffered into `buf`.
    ///
    /// Must resolve without waiting for the peer: if nothing is buffered the
    /// result is [`Received::Nothing`]. Implementations must never report more
    /// bytes than `buf.len()`.
    fn try_receive(
        &mut self,
        buf: &mut [u8],
    ) -> impl Future<Output = Result<Received, Self::Error>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No connection; nothing is sent or parsed
    Idle,
    /// Connection open, streaming telemetry and accepting commands
    Active,
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd<E> {
    PeerClosed,
    TransmitFailed(E),
}

/// Counters collected over one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub frames_sent: u32,
    pub commands: u32,
    pub ignored: u32,
}

pub struct Session<'l, L: Link, const RX: usize = RX_CAPACITY> {
    link: &'l mut L,
    rx: [u8; RX],
    state: SessionState,
    end: Option<SessionEnd<L::Error>>,
    report: SessionReport,
}

impl<'l, L, const RX: usize> Session<'l, L, RX>
where
    L: Link,
{
    /// Start a session on a freshly accepted connection.
    pub fn new(link: &'l mut L) -> Self {
        // One byte of the receive buffer is always kept free.
        const { assert!(RX > 1, "receive buffer must hold at least one byte") };

        Self {
            link,
            rx: [0; RX],
            state: SessionState::Active,
            end: None,
            report: SessionReport::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn report(&self) -> SessionReport {
        self.report
    }

    /// Largest chunk read in one iteration
    pub const fn max_chunk() -> usize {
        RX - 1
    }

    /// Run one iteration, without the trailing pause.
    ///
    /// Returns `Break` once the session has ended; the session is then
    /// [`SessionState::Idle`] and further calls return the same `Break`
    /// without touching the link.
    pub async fn step<S, I>(
        &mut self,
        sensor: &mut S,
        acquisition: &mut AcquisitionState,
        indicator: &mut I,
    ) -> ControlFlow<SessionEnd<L::Error>>
    where
        S: PressureSource,
        I: Indicator,
    {
        if let Some(end) = &self.end {
            return ControlFlow::Break(end.clone());
        }

        let reading = sensor.read_pressure();
        match format_frame(reading) {
            Ok(frame) => {
                if let Err(e) = self.link.send(frame.as_bytes()).await {
                    error!("Telemetry transmit failed: {:?}", e);
                    return self.finish(SessionEnd::TransmitFailed(e));
                }
                self.report.frames_sent = self.report.frames_sent.saturating_add(1);
            }
            Err(e) => warn!("Skipping telemetry for reading {}: {}", reading, e),
        }

        let limit = Self::max_chunk();
        match self.link.try_receive(&mut self.rx[..limit]).await {
            Ok(Received::Nothing) => {}
            Ok(Received::Closed) => {
                info!("Client closed the connection");
                return self.finish(SessionEnd::PeerClosed);
            }
            Ok(Received::Data(n)) => {
                let line = first_line(&self.rx[..n.min(limit)]);
                let command = Command::parse(line);
                debug!("Received {} command", command.label());

                if matches!(command, Command::Unrecognized(_)) {
                    self.report.ignored = self.report.ignored.saturating_add(1);
                } else {
                    self.report.commands = self.report.commands.saturating_add(1);
                }
                dispatch(command, acquisition, indicator);
            }
            // A dead peer is caught by the next transmit.
            Err(e) => warn!("Receive failed: {:?}", e),
        }

        ControlFlow::Continue(())
    }

    fn finish(&mut self, end: SessionEnd<L::Error>) -> ControlFlow<SessionEnd<L::Error>> {
        self.state = SessionState::Idle;
        self.end = Some(end.clone());
        ControlFlow::Break(end)
    }
}
