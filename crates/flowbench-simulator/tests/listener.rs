use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use flowbench_core::bridge::Bridge;
use flowbench_core::config::BridgeConfig;
use flowbench_core::indicator::Indicator;
use flowbench_core::sensor::FixedPressure;
use flowbench_simulator::indicator::ThreadDelay;
use flowbench_simulator::listener::Listener;

/// Give the bridge a few ticks to pick up what was just written.
const SETTLE: Duration = Duration::from_millis(200);

#[derive(Clone, Default)]
struct SharedCounter(Arc<AtomicUsize>);

impl Indicator for SharedCounter {
    fn pulse(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn read_frame(reader: &mut impl BufRead) -> String {
    let mut line = String::new();
    reader.read_line(&mut line).unwrap();
    line
}

fn send(stream: &mut TcpStream, line: &str) {
    stream.write_all(line.as_bytes()).unwrap();
    stream.flush().unwrap();
    thread::sleep(SETTLE);
}

#[test]
fn test_state_carries_across_sequential_clients() {
    let listener = Listener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let pulses = SharedCounter::default();

    let server_pulses = pulses.clone();
    let server = thread::spawn(move || {
        let mut bridge = Bridge::new(
            FixedPressure(42.0),
            server_pulses,
            ThreadDelay,
            BridgeConfig::DEFAULT,
        );
        listener.serve(&mut bridge, Some(2)).unwrap();
        *bridge.acquisition()
    });

    let mut first = TcpStream::connect(addr).unwrap();
    let mut reader = BufReader::new(first.try_clone().unwrap());
    assert_eq!(read_frame(&mut reader), "ADC:42.0000\n");

    send(&mut first, "START\n");
    send(&mut first, "SET_RATE:100\n");
    send(&mut first, "SET_RATE:abc\n");
    first.shutdown(Shutdown::Both).unwrap();
    drop(reader);
    drop(first);

    let mut second = TcpStream::connect(addr).unwrap();
    let mut reader = BufReader::new(second.try_clone().unwrap());
    assert_eq!(read_frame(&mut reader), "ADC:42.0000\n");

    send(&mut second, "LED\r\n");
    second.shutdown(Shutdown::Both).unwrap();
    drop(reader);
    drop(second);

    let acquisition = server.join().unwrap();
    assert!(acquisition.is_running());
    assert_eq!(acquisition.rate_hz(), Some(100));
    assert_eq!(pulses.0.load(Ordering::SeqCst), 1);
}

#[test]
fn test_frames_keep_flowing_without_commands() {
    let listener = Listener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let server = thread::spawn(move || {
        let mut bridge = Bridge::new(
            FixedPressure(-1.5),
            SharedCounter::default(),
            ThreadDelay,
            BridgeConfig::DEFAULT,
        );
        listener.serve(&mut bridge, Some(1)).unwrap();
        *bridge.acquisition()
    });

    let client = TcpStream::connect(addr).unwrap();
    let mut reader = BufReader::new(client.try_clone().unwrap());
    for _ in 0..5 {
        assert_eq!(read_frame(&mut reader), "ADC:-1.5000\n");
    }
    client.shutdown(Shutdown::Both).unwrap();
    drop(reader);
    drop(client);

    let acquisition = server.join().unwrap();
    assert!(!acquisition.is_running());
    assert_eq!(acquisition.rate_hz(), None);
}
