//! Sensor source abstraction

/// Produces the current pressure reading on demand.
///
/// Called once per session loop iteration, so implementations should return
/// quickly; there is no async variant.
pub trait PressureSource {
    fn read_pressure(&mut self) -> f32;
}

/// Source that always reports the same value.
///
/// Stands in for the analog front end until the ADC driver lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPressure(pub f32);

impl PressureSource for FixedPressure {
    fn read_pressure(&mut self) -> f32 {
        self.0
    }
}
