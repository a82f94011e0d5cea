//! CSV recording of the telemetry a bridge streams
//!
//! Each `ADC:<value>` frame becomes one row of elapsed seconds since recording
//! started and the reading, both with four decimals:
//!
//! ```text
//! time_elapsed,pressure_bar
//! 0.0102,1.0130
//! ```

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use log::warn;

pub const CSV_HEADER: &str = "time_elapsed,pressure_bar";

/// Extract the reading from one telemetry line, with or without its terminator.
pub fn parse_frame(line: &str) -> Option<f32> {
    line.trim_end_matches(['\r', '\n'])
        .strip_prefix("ADC:")?
        .parse()
        .ok()
}

pub struct Recorder<W> {
    out: W,
    rows: u64,
}

impl<W: Write> Recorder<W> {
    /// Start a recording, writing the header row immediately.
    pub fn new(mut out: W) -> io::Result<Self> {
        writeln!(out, "{CSV_HEADER}")?;
        Ok(Self { out, rows: 0 })
    }

    /// Append `line` if it is a telemetry frame. Returns whether a row was written.
    pub fn record(&mut self, elapsed: Duration, line: &str) -> io::Result<bool> {
        let Some(value) = parse_frame(line) else {
            warn!("Skipping non-telemetry line {:?}", line);
            return Ok(false);
        };

        writeln!(self.out, "{:.4},{:.4}", elapsed.as_secs_f64(), value)?;
        self.rows += 1;
        Ok(true)
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Record every frame from `source` until it reaches end of stream.
    ///
    /// Elapsed time is measured from this call. Returns the total row count.
    pub fn record_stream(&mut self, source: impl BufRead) -> io::Result<u64> {
        let started = Instant::now();
        for line in source.lines() {
            self.record(started.elapsed(), &line?)?;
        }
        self.out.flush()?;
        Ok(self.rows)
    }
}
