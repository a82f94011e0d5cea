//! Fakes shared by the unit tests

extern crate std;

use core::convert::Infallible;
use std::collections::VecDeque;
use std::vec::Vec;

use crate::indicator::Indicator;
use crate::session::{Link, Received};

#[derive(Debug, Default)]
pub struct CountingIndicator {
    pub pulses: usize,
}

impl Indicator for CountingIndicator {
    fn pulse(&mut self) {
        self.pulses += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingPin {
    pub levels: Vec<bool>,
}

impl embedded_hal::digital::ErrorType for RecordingPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.push(true);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub calls: usize,
    total_ns: u64,
}

impl RecordingDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl embedded_hal_async::delay::DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ns);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkError;

/// What the fake peer does on the next receive attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    Nothing,
    Data(Vec<u8>),
    Close,
    Fail,
}

/// In-memory [`Link`] driven by a script of peer behaviour.
///
/// Once the script runs out every receive reports no data. Data larger than
/// the caller's buffer is split, with the remainder delivered on the next
/// receive, the way a socket keeps unread bytes queued.
#[derive(Debug, Default)]
pub struct ScriptedLink {
    pub sent: Vec<Vec<u8>>,
    pub incoming: VecDeque<Incoming>,
    /// Fail every send once this many frames have gone out
    pub fail_sends_after: Option<usize>,
    pub receive_calls: usize,
}

impl ScriptedLink {
    pub fn with_script<I: IntoIterator<Item = Incoming>>(script: I) -> Self {
        Self {
            incoming: script.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn sent_text(&self) -> Vec<&str> {
        self.sent
            .iter()
            .map(|frame| core::str::from_utf8(frame).unwrap())
            .collect()
    }
}

impl Link for ScriptedLink {
    type Error = LinkError;

    async fn send(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        if self.fail_sends_after.is_some_and(|limit| self.sent.len() >= limit) {
            return Err(LinkError);
        }
        self.sent.push(bytes.to_vec());
        Ok(())
    }

    async fn try_receive(&mut self, buf: &mut [u8]) -> Result<Received, LinkError> {
        self.receive_calls += 1;
        match self.incoming.pop_front() {
            None | Some(Incoming::Nothing) => Ok(Received::Nothing),
            Some(Incoming::Close) => Ok(Received::Closed),
            Some(Incoming::Fail) => Err(LinkError),
            Some(Incoming::Data(mut data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    self.incoming.push_front(Incoming::Data(data.split_off(n)));
                }
                Ok(Received::Data(n))
            }
        }
    }
}
