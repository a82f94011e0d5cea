use std::io::{BufReader, Read};
use std::net::TcpStream;
use std::thread;

use flowbench_core::bridge::Bridge;
use flowbench_core::config::BridgeConfig;
use flowbench_core::indicator::Indicator;
use flowbench_core::sensor::FixedPressure;
use flowbench_simulator::indicator::ThreadDelay;
use flowbench_simulator::listener::Listener;
use flowbench_simulator::recorder::Recorder;

struct NoIndicator;

impl Indicator for NoIndicator {
    fn pulse(&mut self) {}
}

#[test]
fn test_records_live_telemetry() {
    let listener = Listener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let server = thread::spawn(move || {
        let mut bridge =
            Bridge::new(FixedPressure(1.25), NoIndicator, ThreadDelay, BridgeConfig::DEFAULT);
        listener.serve(&mut bridge, Some(1)).unwrap();
    });

    let frame_len = "ADC:1.2500\n".len() as u64;
    let stream = TcpStream::connect(addr).unwrap();
    let mut recorder = Recorder::new(Vec::new()).unwrap();

    // Closes the connection once four frames have been read.
    let rows = recorder
        .record_stream(BufReader::new(stream.take(4 * frame_len)))
        .unwrap();
    server.join().unwrap();

    assert_eq!(rows, 4);
    let csv = String::from_utf8(recorder.into_inner()).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("time_elapsed,pressure_bar"));

    let mut last_elapsed = 0.0;
    for row in lines {
        let (elapsed, value) = row.split_once(',').unwrap();
        let elapsed: f64 = elapsed.parse().unwrap();
        assert!(elapsed >= last_elapsed);
        assert_eq!(value, "1.2500");
        last_elapsed = elapsed;
    }
}
