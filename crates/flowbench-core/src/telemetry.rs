//! Telemetry frame formatting
//!
//! One frame is emitted per session loop iteration:
//!
//! ```text
//! ADC:<value with exactly 4 decimal digits>\n
//! ```

use core::fmt::Write;

use heapless::String;
use thiserror_no_std::Error;

/// Size of the transmit scratch buffer a frame is rendered into
pub const FRAME_CAPACITY: usize = 64;

/// Length of the longest possible frame, `ADC:-<39 digits>.0000\n` for `-f32::MAX`
pub const LONGEST_FRAME: usize = "ADC:-".len() + 39 + ".0000".len() + 1;

const _: () = assert!(LONGEST_FRAME <= FRAME_CAPACITY);

pub type TelemetryFrame = String<FRAME_CAPACITY>;

/// Cannot occur for any `f32` while [`LONGEST_FRAME`] fits in
/// [`FRAME_CAPACITY`]; the formatter still reports it rather than truncate.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    #[error("Telemetry frame does not fit in the transmit buffer")]
    Overflow,
}

/// Render one reading as a telemetry line.
pub fn format_frame(value: f32) -> Result<TelemetryFrame, FrameError> {
    let mut frame = TelemetryFrame::new();
    write!(frame, "ADC:{:.4}\n", value).map_err(|_| FrameError::Overflow)?;
    Ok(frame)
}
