//! Applies decoded commands to the acquisition state

use log::{debug, info, warn};

use crate::acquisition::AcquisitionState;
use crate::command::{Command, printable};
use crate::indicator::Indicator;

/// Apply one command.
///
/// Nothing is reported back to the client. A `Blink` only enqueues a pulse
/// request; the indicator runs it on its own time so the session loop never
/// waits on it.
pub fn dispatch<I: Indicator>(
    command: Command<'_>,
    state: &mut AcquisitionState,
    indicator: &mut I,
) {
    match command {
        Command::Blink => {
            debug!("Indicator pulse requested");
            indicator.pulse();
        }
        Command::Start => {
            state.start();
            info!("Acquisition started");
        }
        Command::Stop => {
            state.stop();
            info!("Acquisition stopped");
        }
        Command::SetRate(rate_hz) => {
            state.set_rate(rate_hz);
            info!("Sampling rate set to {} Hz", rate_hz);
        }
        Command::Unrecognized(raw) => {
            warn!("Ignoring unrecognized command: {:?}", printable(raw));
        }
    }
}
