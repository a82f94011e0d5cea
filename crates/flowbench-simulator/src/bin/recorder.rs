//! Records the telemetry of a flowbench bridge to a CSV file.
//!
//! Connects to `FLOWBENCH_RECORD_ADDR` (default `192.168.4.1:3333`, the
//! device's access point address) and writes `pressure_<unix seconds>.csv`
//! into `FLOWBENCH_RECORD_DIR` (default: the current directory) until the
//! bridge closes the connection.
//!
//! Only one client is served at a time, so the recorder occupies the bench
//! connection while it runs.

use std::env;
use std::fs::File;
use std::io::{self, BufReader, LineWriter};
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{error, info};

use flowbench_simulator::recorder::Recorder;

const DEFAULT_ADDR: &str = "192.168.4.1:3333";

fn record(addr: &str, path: &Path) -> io::Result<u64> {
    let stream = TcpStream::connect(addr)?;
    info!("Connected to {}, recording to {}", addr, path.display());

    // Line buffered so an interrupted recording keeps every complete row.
    let mut recorder = Recorder::new(LineWriter::new(File::create(path)?))?;
    recorder.record_stream(BufReader::new(stream))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr = env::var("FLOWBENCH_RECORD_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let dir = env::var_os("FLOWBENCH_RECORD_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs());
    let path = dir.join(format!("pressure_{stamp}.csv"));

    match record(&addr, &path) {
        Ok(rows) => {
            info!("Connection closed after {} rows", rows);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Recording from {} failed: {}", addr, e);
            ExitCode::FAILURE
        }
    }
}
