use serde::{Deserialize, Serialize};

use crate::config::EndpointConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

// Removed Sync, as we use Mutex to coordinate access
pub trait Controller: Send {
    /// Target endpoint in display form (e.g. "192.168.0.101:7777").
    fn endpoint(&self) -> String;

    fn model(&self) -> String;

    /// Transmit one full frame of colors in strip order.
    ///
    /// `brightness` (0..=100) is applied at serialization time; stored pixel
    /// values are never modified. Best-effort: a send failure is returned to
    /// the caller, never escalated to a panic.
    fn update(&mut self, colors: &[Color], brightness: u8) -> Result<(), String>;

    /// Re-target the controller after an "apply settings" operation.
    fn reconfigure(&mut self, endpoint: &EndpointConfig) -> Result<(), String>;

    /// Best-effort liveness probe. `true` means the probe datagram was handed
    /// to the network stack without error, nothing more.
    fn is_reachable(&self) -> bool {
        true
    }

    fn clear(&mut self, led_count: usize) -> Result<(), String> {
        let black = vec![Color::default(); led_count.max(1)];
        self.update(&black, 100)
    }

    fn disconnect(&mut self) -> Result<(), String> {
        Ok(())
    }
}
