//! Hardware-independent core library for flowbench
//!
//! This crate contains the platform-agnostic half of the flowbench
//! data-acquisition bridge: the line command protocol, the acquisition state
//! it mutates, telemetry framing, the indicator worker and the single-client
//! session loop that ties them together.
//!
//! It is `#![no_std]` so it compiles on both the ESP32-S3 firmware and desktop
//! hosts (for the simulator and tests).

#![no_std]

pub mod acquisition;
pub mod backlog;
pub mod bridge;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod indicator;
pub mod sensor;
pub mod session;
pub mod telemetry;

#[cfg(test)]
mod testing;
