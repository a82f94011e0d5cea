//! Synthetic pressure readings

use std::time::Instant;

use flowbench_core::sensor::PressureSource;

/// Baseline reading in bar
const BASELINE_BAR: f64 = 1.013;
/// Peak deviation from the baseline in bar
const SWING_BAR: f64 = 0.25;
/// Period of the slow oscillation in seconds
const PERIOD_SECS: f64 = 20.0;

/// Pressure that drifts slowly around atmospheric so plots have something to show.
pub struct SyntheticPressure {
    started: Instant,
}

impl SyntheticPressure {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Reading at `t` seconds after start
    pub fn at(t: f64) -> f32 {
        let phase = core::f64::consts::TAU * t / PERIOD_SECS;
        (BASELINE_BAR + SWING_BAR * phase.sin() + 0.01 * (phase * 7.0).cos()) as f32
    }
}

impl Default for SyntheticPressure {
    fn default() -> Self {
        Self::new()
    }
}

impl PressureSource for SyntheticPressure {
    fn read_pressure(&mut self) -> f32 {
        Self::at(self.started.elapsed().as_secs_f64())
    }
}
