//! Indicator pulse requests and the worker that performs them
//!
//! The session loop never drives the indicator pin directly. A `LED` command
//! drops an [`IndicatorRequest`] into a bounded channel and the loop carries
//! on; a separate task owns the pin and works through the queue at its own
//! pace. There is no completion signal back to the session.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use log::{error, warn};

/// Pulses that may be waiting while one is already lit
pub const INDICATOR_QUEUE_DEPTH: usize = 4;

/// How long one pulse keeps the indicator lit
pub const DEFAULT_PULSE_MS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorRequest {
    /// Light the indicator for one pulse length
    Pulse,
}

pub type IndicatorChannel =
    Channel<CriticalSectionRawMutex, IndicatorRequest, INDICATOR_QUEUE_DEPTH>;
pub type IndicatorSender<'a> =
    Sender<'a, CriticalSectionRawMutex, IndicatorRequest, INDICATOR_QUEUE_DEPTH>;
pub type IndicatorReceiver<'a> =
    Receiver<'a, CriticalSectionRawMutex, IndicatorRequest, INDICATOR_QUEUE_DEPTH>;

/// Global request queue between the session task and the indicator task
pub static INDICATOR_REQUESTS: IndicatorChannel = Channel::new();

/// Something that can be asked for a visual pulse without waiting on it.
pub trait Indicator {
    fn pulse(&mut self);
}

/// [`Indicator`] that forwards requests to an [`IndicatorWorker`] over a channel
pub struct QueuedIndicator<'a> {
    sender: IndicatorSender<'a>,
}

impl<'a> QueuedIndicator<'a> {
    pub const fn new(sender: IndicatorSender<'a>) -> Self {
        Self { sender }
    }
}

impl Indicator for QueuedIndicator<'_> {
    fn pulse(&mut self) {
        // Never wait for queue space here.
        if self.sender.try_send(IndicatorRequest::Pulse).is_err() {
            warn!("Indicator queue full, dropping pulse request");
        }
    }
}

/// Owns the indicator output and performs queued pulses one after another.
pub struct IndicatorWorker<P, D> {
    pin: P,
    delay: D,
    pulse_ms: u32,
}

impl<P, D> IndicatorWorker<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D, pulse_ms: u32) -> Self {
        Self {
            pin,
            delay,
            pulse_ms,
        }
    }

    /// Perform one request. The pin is left low afterwards.
    pub async fn handle(&mut self, request: IndicatorRequest) -> Result<(), P::Error> {
        match request {
            IndicatorRequest::Pulse => {
                self.pin.set_high()?;
                self.delay.delay_ms(self.pulse_ms).await;
                self.pin.set_low()
            }
        }
    }

    /// Serve requests forever.
    pub async fn run(&mut self, requests: IndicatorReceiver<'_>) -> ! {
        if let Err(e) = self.pin.set_low() {
            error!("Failed to reset indicator pin: {:?}", e);
        }

        loop {
            let request = requests.receive().await;
            if let Err(e) = self.handle(request).await {
                error!("Indicator {:?} failed: {:?}", request, e);
            }
        }
    }
}
