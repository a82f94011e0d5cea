//! Host-side pieces for running the flowbench session engine over `std::net`.
//!
//! The simulator serves the exact same [`flowbench_core::bridge::Bridge`] as
//! the firmware, with a synthetic pressure source and an indicator that logs
//! instead of lighting an LED. Bench client software can be developed against
//! it without hardware.
//!
//! [`recorder`] is the other side of the wire: it logs the telemetry of a
//! simulator or a real device to CSV.

pub mod indicator;
pub mod link;
pub mod listener;
pub mod recorder;
pub mod sensor;
