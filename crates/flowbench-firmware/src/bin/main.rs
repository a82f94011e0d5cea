#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_net::StackResources;
use embassy_time::{Delay, Duration, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;
use log::info;
use static_cell::StaticCell;

use flowbench_core::bridge::Bridge;
use flowbench_core::config::BridgeConfig;
use flowbench_core::indicator::{INDICATOR_REQUESTS, QueuedIndicator};
use flowbench_core::sensor::FixedPressure;
use flowbench_firmware::{indicator, listener, net, wifi_secrets};

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

extern crate alloc;

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

/// Reported until the pressure ADC driver is wired in
const PLACEHOLDER_PRESSURE: f32 = 42.0;

static RADIO: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_log!(log::LevelFilter::Info);

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 73744);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Embassy initialized");

    let bridge_config = BridgeConfig::DEFAULT;

    // Status LED, low until the first LED command
    let led = Output::new(peripherals.GPIO2, Level::Low, OutputConfig::default());
    spawner
        .spawn(indicator::indicator_task(led, bridge_config.pulse_ms))
        .expect("indicator_task spawn");

    let radio = RADIO.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));
    let (wifi_controller, interfaces) =
        esp_radio::wifi::new(radio, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi controller");

    let rng = Rng::new();
    let seed = (u64::from(rng.random()) << 32) | u64::from(rng.random());

    let resources = net::NET_RESOURCES.init(StackResources::new());
    let (stack, runner) = embassy_net::new(interfaces.ap, net::ap_net_config(), resources, seed);

    spawner
        .spawn(net::access_point_task(
            wifi_controller,
            wifi_secrets::access_point_config(),
        ))
        .expect("access_point_task spawn");
    spawner
        .spawn(net::net_task(runner))
        .expect("net_task spawn");

    let bridge = Bridge::new(
        FixedPressure(PLACEHOLDER_PRESSURE),
        QueuedIndicator::new(INDICATOR_REQUESTS.sender()),
        Delay,
        bridge_config,
    );
    spawner
        .spawn(listener::listener_task(stack, bridge))
        .expect("listener_task spawn");

    info!("Flowbench bridge running");

    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}
