//! ESP32-S3 firmware-specific modules for flowbench
//!
//! This crate contains the hardware-facing half of the bridge: Wi-Fi access
//! point bring-up, the embassy-net stack, the TCP listener that feeds
//! accepted sockets to the core session engine, and the GPIO indicator task.

#![no_std]

pub mod indicator;
pub mod listener;
pub mod net;
pub mod wifi_secrets;
