//! Access point credentials, fixed at build time by `build.rs`

use flowbench_core::config::AccessPointConfig;

pub const AP_SSID: &str = env!("FLOWBENCH_AP_SSID");
pub const AP_PASSWORD: &str = env!("FLOWBENCH_AP_PASSWORD");

pub fn access_point_config() -> AccessPointConfig<'static> {
    AccessPointConfig {
        ssid: AP_SSID,
        password: AP_PASSWORD,
        ..AccessPointConfig::default()
    }
}
