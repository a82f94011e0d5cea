//! Long-lived bridge context shared by consecutive sessions

use core::ops::ControlFlow;

use embedded_hal_async::delay::DelayNs;
use log::info;

use crate::acquisition::AcquisitionState;
use crate::config::BridgeConfig;
use crate::indicator::Indicator;
use crate::sensor::PressureSource;
use crate::session::{Link, Session, SessionEnd, SessionReport};

/// How a served session finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary<E> {
    pub end: SessionEnd<E>,
    pub report: SessionReport,
}

/// Everything a session needs that outlives any single connection.
///
/// The listener owns one `Bridge` and hands it each accepted link in turn, so
/// acquisition state set by one client carries over to the next.
pub struct Bridge<S, I, D> {
    sensor: S,
    indicator: I,
    delay: D,
    acquisition: AcquisitionState,
    config: BridgeConfig,
}

impl<S, I, D> Bridge<S, I, D>
where
    S: PressureSource,
    I: Indicator,
    D: DelayNs,
{
    pub fn new(sensor: S, indicator: I, delay: D, config: BridgeConfig) -> Self {
        Self {
            sensor,
            indicator,
            delay,
            acquisition: AcquisitionState::new(),
            config,
        }
    }

    pub fn acquisition(&self) -> &AcquisitionState {
        &self.acquisition
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Run a session on `link` until it ends.
    ///
    /// Iterations are separated by the configured tick, awaited on the delay
    /// so the executor can run other tasks in between.
    pub async fn serve<L: Link>(&mut self, link: &mut L) -> SessionSummary<L::Error> {
        let mut session: Session<'_, L> = Session::new(link);

        loop {
            let step = session
                .step(&mut self.sensor, &mut self.acquisition, &mut self.indicator)
                .await;

            if let ControlFlow::Break(end) = step {
                let report = session.report();
                info!(
                    "Session ended ({:?}): {} frames sent, {} commands, {} ignored",
                    end, report.frames_sent, report.commands, report.ignored
                );
                return SessionSummary { end, report };
            }

            self.delay.delay_ms(self.config.tick_ms).await;
        }
    }
}
