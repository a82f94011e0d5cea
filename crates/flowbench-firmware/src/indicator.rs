//! GPIO-backed indicator task

use embassy_time::Delay;
use esp_hal::gpio::Output;
use flowbench_core::indicator::{INDICATOR_REQUESTS, IndicatorWorker};

/// Drive the status LED from the global indicator queue.
#[embassy_executor::task]
pub async fn indicator_task(led: Output<'static>, pulse_ms: u32) {
    let mut worker = IndicatorWorker::new(led, Delay, pulse_ms);
    worker.run(INDICATOR_REQUESTS.receiver()).await;
}
