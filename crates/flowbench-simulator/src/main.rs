//! Desktop simulator for the flowbench data-acquisition bridge.
//!
//! Listens on `FLOWBENCH_SIM_ADDR` (default `127.0.0.1:3333`) and speaks the
//! same line protocol as the firmware: `ADC:<value>` telemetry out, `LED`,
//! `START`, `STOP` and `SET_RATE:<hz>` commands in. Readings come from a
//! synthetic pressure source and LED pulses show up in the log.
//!
//! Log verbosity follows `RUST_LOG` and defaults to `info`.

use std::env;
use std::process::ExitCode;

use log::error;

use flowbench_core::bridge::Bridge;
use flowbench_core::config::BridgeConfig;
use flowbench_core::indicator::{INDICATOR_REQUESTS, QueuedIndicator};
use flowbench_simulator::indicator::{ThreadDelay, spawn_indicator};
use flowbench_simulator::listener::Listener;
use flowbench_simulator::sensor::SyntheticPressure;

const DEFAULT_ADDR: &str = "127.0.0.1:3333";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr = env::var("FLOWBENCH_SIM_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let config = BridgeConfig::DEFAULT;

    let _indicator = spawn_indicator(config.pulse_ms);

    let mut bridge = Bridge::new(
        SyntheticPressure::new(),
        QueuedIndicator::new(INDICATOR_REQUESTS.sender()),
        ThreadDelay,
        config,
    );

    let result =
        Listener::bind(addr.as_str()).and_then(|listener| listener.serve(&mut bridge, None));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Listener on {} failed: {}", addr, e);
            ExitCode::FAILURE
        }
    }
}
