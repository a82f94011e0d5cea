//! Bridge configuration constants

use crate::indicator::DEFAULT_PULSE_MS;

/// Well-known TCP port the listener binds on all local addresses
pub const DEFAULT_PORT: u16 = 3333;

/// Session receive buffer size. At most `RX_CAPACITY - 1` bytes are read per
/// loop iteration.
pub const RX_CAPACITY: usize = 1024;

/// Pause between session loop iterations
pub const DEFAULT_TICK_MS: u32 = 10;

pub const DEFAULT_AP_SSID: &str = "Flowbench-DAQ";
pub const DEFAULT_AP_PASSWORD: &str = "testbench123";

/// Runtime parameters of the session engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    pub port: u16,
    /// Delay between iterations. Bounds the telemetry rate and yields to the
    /// scheduler; it is not a precision clock.
    pub tick_ms: u32,
    /// Indicator on-time for one `LED` command
    pub pulse_ms: u32,
}

impl BridgeConfig {
    pub const DEFAULT: Self = Self {
        port: DEFAULT_PORT,
        tick_ms: DEFAULT_TICK_MS,
        pulse_ms: DEFAULT_PULSE_MS,
    };
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Wi-Fi access point advertised by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPointConfig<'a> {
    pub ssid: &'a str,
    pub password: &'a str,
    /// Only one station is useful since only one session is served at a time
    pub max_clients: u16,
}

impl Default for AccessPointConfig<'_> {
    fn default() -> Self {
        Self {
            ssid: DEFAULT_AP_SSID,
            password: DEFAULT_AP_PASSWORD,
            max_clients: 1,
        }
    }
}
