//! Wi-Fi access point and network stack tasks

use embassy_net::{
    Config as NetConfig, Ipv4Address, Ipv4Cidr, Runner, StackResources, StaticConfigV4,
};
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{
    AccessPointConfig as RadioApConfig, AuthMethod, ModeConfig, WifiController, WifiDevice,
    WifiEvent,
};
use flowbench_core::config::AccessPointConfig;
use log::{error, info, warn};
use static_cell::StaticCell;

/// Address the device answers on inside its own network. There is no DHCP
/// server, so clients configure an address in the same /24 by hand.
pub const AP_ADDRESS: Ipv4Address = Ipv4Address::new(192, 168, 4, 1);
pub const AP_PREFIX_LEN: u8 = 24;

/// Active and pending listener sockets plus headroom for the stack's own bookkeeping
pub const SOCKET_COUNT: usize = 3;

pub static NET_RESOURCES: StaticCell<StackResources<SOCKET_COUNT>> = StaticCell::new();

const AP_RESTART_DELAY: Duration = Duration::from_secs(5);

/// Static IPv4 configuration for the access point interface
pub fn ap_net_config() -> NetConfig {
    NetConfig::ipv4_static(StaticConfigV4 {
        address: Ipv4Cidr::new(AP_ADDRESS, AP_PREFIX_LEN),
        gateway: None,
        dns_servers: Default::default(),
    })
}

/// Bring the access point up and restart it if the driver ever stops it.
#[embassy_executor::task]
pub async fn access_point_task(
    mut controller: WifiController<'static>,
    config: AccessPointConfig<'static>,
) {
    let mode = ModeConfig::AccessPoint(
        RadioApConfig::default()
            .with_ssid(config.ssid.into())
            .with_password(config.password.into())
            .with_auth_method(AuthMethod::Wpa2Personal)
            .with_max_connections(config.max_clients),
    );

    loop {
        if !matches!(controller.is_started(), Ok(true)) {
            if let Err(e) = controller.set_config(&mode) {
                error!("Access point configuration rejected: {:?}", e);
                Timer::after(AP_RESTART_DELAY).await;
                continue;
            }

            info!("Starting access point \"{}\"", config.ssid);
            if let Err(e) = controller.start_async().await {
                error!("Access point failed to start: {:?}", e);
                Timer::after(AP_RESTART_DELAY).await;
                continue;
            }
            info!("Access point up at {}/{}", AP_ADDRESS, AP_PREFIX_LEN);
        }

        controller.wait_for_event(WifiEvent::ApStop).await;
        warn!("Access point stopped; restarting");
        Timer::after(AP_RESTART_DELAY).await;
    }
}

/// Background task for running the network stack
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}
