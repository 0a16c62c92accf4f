//! Strip settings: endpoint, LED count and brightness defaults, plus JSON
//! persistence. The file format is plain serde JSON; a missing file yields
//! the built-in defaults.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_UDP_IP: &str = "192.168.0.101";
pub const DEFAULT_UDP_PORT: u16 = 7777;
pub const DEFAULT_LEDS_COUNT: usize = 42;
pub const DEFAULT_LEDS_BRIGHTNESS: u8 = 100;
/// Upper bound on pixels per datagram; keeps every packet well under the
/// typical safe UDP payload (1 + 128 * 3 = 385 bytes).
pub const DEFAULT_LEDS_PER_PACKET: usize = 128;

/// Where to send pixel data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub host: String,
    pub port: u16,
    /// Maximum pixels carried by a single datagram.
    pub leds_per_packet: usize,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_UDP_IP.to_string(),
            port: DEFAULT_UDP_PORT,
            leds_per_packet: DEFAULT_LEDS_PER_PACKET,
        }
    }
}

/// Full strip configuration as supplied by the host application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripSettings {
    pub udp_ip: String,
    pub udp_port: u16,
    pub leds_count: usize,
    pub leds_brightness: u8,
    pub leds_per_packet: usize,
}

impl Default for StripSettings {
    fn default() -> Self {
        Self {
            udp_ip: DEFAULT_UDP_IP.to_string(),
            udp_port: DEFAULT_UDP_PORT,
            leds_count: DEFAULT_LEDS_COUNT,
            leds_brightness: DEFAULT_LEDS_BRIGHTNESS,
            leds_per_packet: DEFAULT_LEDS_PER_PACKET,
        }
    }
}

impl StripSettings {
    pub fn endpoint(&self) -> EndpointConfig {
        EndpointConfig {
            host: self.udp_ip.clone(),
            port: self.udp_port,
            leds_per_packet: self.leds_per_packet,
        }
    }
}

pub fn load_settings(path: &Path) -> Result<StripSettings, String> {
    if !path.exists() {
        return Ok(StripSettings::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read settings '{path:?}': {e}"))?;

    serde_json::from_str::<StripSettings>(&raw)
        .map_err(|e| format!("Failed to parse settings '{path:?}': {e}"))
}

pub fn save_settings(path: &Path, settings: &StripSettings) -> Result<(), String> {
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;

    // Atomic-ish write: write to temp then rename.
    let tmp = path.with_extension("json.tmp");
    {
        let mut f = std::fs::File::create(&tmp)
            .map_err(|e| format!("Failed to create settings '{tmp:?}': {e}"))?;
        f.write_all(json.as_bytes())
            .map_err(|e| format!("Failed to write settings '{tmp:?}': {e}"))?;
        f.flush()
            .map_err(|e| format!("Failed to flush settings '{tmp:?}': {e}"))?;
    }
    std::fs::rename(&tmp, path)
        .map_err(|e| format!("Failed to move settings '{tmp:?}' -> '{path:?}': {e}"))?;

    Ok(())
}
