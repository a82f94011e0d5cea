//! Bakes the access point credentials into the firmware.
//!
//! Values come from the environment or a `.env` file anywhere above the
//! crate; missing keys fall back to the bench defaults.

const SSID_KEY: &str = "FLOWBENCH_AP_SSID";
const PASSWORD_KEY: &str = "FLOWBENCH_AP_PASSWORD";

const DEFAULT_SSID: &str = "Flowbench-DAQ";
const DEFAULT_PASSWORD: &str = "testbench123";

fn main() {
    if let Ok(path) = dotenvy::dotenv() {
        println!("cargo:rerun-if-changed={}", path.display());
    }
    println!("cargo:rerun-if-env-changed={SSID_KEY}");
    println!("cargo:rerun-if-env-changed={PASSWORD_KEY}");

    let ssid = std::env::var(SSID_KEY).unwrap_or_else(|_| DEFAULT_SSID.to_owned());
    let password = std::env::var(PASSWORD_KEY).unwrap_or_else(|_| DEFAULT_PASSWORD.to_owned());

    if ssid.is_empty() || ssid.len() > 32 {
        panic!("{SSID_KEY} must be 1 to 32 bytes long, got {}", ssid.len());
    }
    // WPA2-Personal passphrases are 8..=63 characters.
    if !(8..=63).contains(&password.len()) {
        panic!("{PASSWORD_KEY} must be 8 to 63 characters long");
    }

    println!("cargo:rustc-env={SSID_KEY}={ssid}");
    println!("cargo:rustc-env={PASSWORD_KEY}={password}");

    println!("cargo:rustc-link-arg-bins=-Tlinkall.x");
}
