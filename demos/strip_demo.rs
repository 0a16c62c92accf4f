//! Minimal driver for a NeoPixel UDP strip:
//!
//! ```text
//! cargo run --example strip_demo -- 192.168.0.101 7777 42
//! ```
//!
//! Paints a solid color, then runs each animation pattern for a few seconds.

use std::time::Duration;

use neolight::{Color, LightingManager, StripSettings};

fn main() -> Result<(), String> {
    let mut args = std::env::args().skip(1);

    let mut settings = StripSettings::default();
    if let Some(ip) = args.next() {
        settings.udp_ip = ip;
    }
    if let Some(port) = args.next() {
        settings.udp_port = port
            .parse()
            .map_err(|e| format!("Invalid port '{}': {}", port, e))?;
    }
    if let Some(leds) = args.next() {
        settings.leds_count = leds
            .parse()
            .map_err(|e| format!("Invalid LED count '{}': {}", leds, e))?;
    }

    let manager = LightingManager::connect(&settings)?;
    println!(
        "Driving {} LEDs at {} (reachable: {})",
        manager.led_count(),
        manager.endpoint(),
        manager.is_reachable()
    );

    manager.set_color(Color::new(0, 64, 128))?;
    std::thread::sleep(Duration::from_secs(2));

    for effect_id in ["sparkling_star", "running_rainbow", "color_fade"] {
        println!("Running '{}'...", effect_id);
        manager.start_animation(effect_id, Some(0.04))?;
        std::thread::sleep(Duration::from_secs(4));
    }

    manager.stop_animation();
    manager.set_color(Color::BLACK)?;
    Ok(())
}
