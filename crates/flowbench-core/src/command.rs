//! Line protocol command decoding
//!
//! Clients drive the bridge with single ASCII lines. Matching is prefix based
//! and case-sensitive, checked in a fixed priority order, so every line maps
//! to exactly one [`Command`]:
//!
//! | Line prefix          | Command                  |
//! |----------------------|--------------------------|
//! | `LED`                | [`Command::Blink`]       |
//! | `START`              | [`Command::Start`]       |
//! | `STOP`               | [`Command::Stop`]        |
//! | `SET_RATE:<integer>` | [`Command::SetRate`]     |
//! | anything else        | [`Command::Unrecognized`]|

use core::str;

pub const BLINK_PREFIX: &[u8] = b"LED";
pub const START_PREFIX: &[u8] = b"START";
pub const STOP_PREFIX: &[u8] = b"STOP";
pub const SET_RATE_PREFIX: &[u8] = b"SET_RATE:";

/// One decoded client instruction.
///
/// Borrowed from the session's receive buffer and consumed by the dispatcher
/// in the same loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Pulse the indicator once
    Blink,
    /// Mark acquisition as running
    Start,
    /// Mark acquisition as stopped
    Stop,
    /// Requested sampling rate in Hz
    SetRate(u32),
    /// Anything that did not match, including a `SET_RATE:` with a bad number
    Unrecognized(&'a [u8]),
}

impl<'a> Command<'a> {
    /// Decode a line whose terminators have already been stripped.
    ///
    /// Never fails: input that matches no prefix, or a `SET_RATE:` whose
    /// remainder is not a base-10 integer (optionally `+`-signed) that fits in
    /// a `u32`, resolves to [`Command::Unrecognized`] carrying the raw line.
    pub fn parse(line: &'a [u8]) -> Self {
        if line.starts_with(BLINK_PREFIX) {
            Self::Blink
        } else if line.starts_with(START_PREFIX) {
            Self::Start
        } else if line.starts_with(STOP_PREFIX) {
            Self::Stop
        } else if let Some(digits) = line.strip_prefix(SET_RATE_PREFIX) {
            match parse_rate(digits) {
                Some(rate_hz) => Self::SetRate(rate_hz),
                None => Self::Unrecognized(line),
            }
        } else {
            Self::Unrecognized(line)
        }
    }

    /// Short label for log output
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Blink => "LED",
            Self::Start => "START",
            Self::Stop => "STOP",
            Self::SetRate(_) => "SET_RATE",
            Self::Unrecognized(_) => "unrecognized",
        }
    }
}

fn parse_rate(digits: &[u8]) -> Option<u32> {
    str::from_utf8(digits).ok()?.parse().ok()
}

/// Cut a received chunk down to its first line.
///
/// The line ends at the first `\r`, `\n` or NUL byte. Anything after it in the
/// same chunk is discarded, so pipelined commands sent in a single segment are
/// lost; only the first is acted upon.
pub fn first_line(chunk: &[u8]) -> &[u8] {
    let end = chunk
        .iter()
        .position(|&b| matches!(b, b'\r' | b'\n' | 0))
        .unwrap_or(chunk.len());
    &chunk[..end]
}

/// Render raw line bytes for logging.
pub fn printable(raw: &[u8]) -> &str {
    str::from_utf8(raw).unwrap_or("<non-utf8>")
}
