//! Console stand-ins for the indicator LED and the embassy delay

use std::convert::Infallible;
use std::thread;
use std::time::Duration;

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_async::delay::DelayNs;
use embassy_futures::block_on;
use flowbench_core::indicator::{INDICATOR_REQUESTS, IndicatorWorker};
use log::info;

/// How often the indicator thread checks for queued pulses
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// "LED" that reports its level changes through the log
#[derive(Debug, Default)]
pub struct ConsoleLed {
    lit: bool,
}

impl ConsoleLed {
    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

impl ErrorType for ConsoleLed {
    type Error = Infallible;
}

impl OutputPin for ConsoleLed {
    fn set_low(&mut self) -> Result<(), Infallible> {
        if self.lit {
            info!("LED off");
        }
        self.lit = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if !self.lit {
            info!("LED on");
        }
        self.lit = true;
        Ok(())
    }
}

/// Delay that blocks the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    async fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    async fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// Serve the global indicator queue on a background thread.
pub fn spawn_indicator(pulse_ms: u32) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("indicator".into())
        .spawn(move || {
            let mut worker = IndicatorWorker::new(ConsoleLed::default(), ThreadDelay, pulse_ms);
            let requests = INDICATOR_REQUESTS.receiver();
            loop {
                match requests.try_receive() {
                    Ok(request) => {
                        let Ok(()) = block_on(worker.handle(request));
                    }
                    Err(_) => thread::sleep(POLL_INTERVAL),
                }
            }
        })
        .expect("failed to spawn indicator thread")
}
