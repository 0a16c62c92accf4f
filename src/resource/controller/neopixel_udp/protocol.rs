//! NeoPixel UDP wire format (one datagram per chunk):
//!
//! ```text
//! byte[0]   = packet sequence number (0-based per flush, wraps past 255)
//! byte[1..] = (R, G, B) triplets, brightness pre-applied, one per pixel,
//!             at most `leds_per_packet` pixels per datagram
//! ```

use crate::interface::controller::Color;

/// One-byte reachability probe understood as a no-op by the firmware.
pub const PROBE: [u8; 1] = [b'a'];

/// NeoPixel UDP frame encoder.
pub struct NeoPixelProtocol;

impl NeoPixelProtocol {
    /// Scale one channel by brightness percent, integer-truncated. The result
    /// is clamped after scaling as a guard against out-of-range brightness
    /// values, which configuration rejects upstream.
    #[inline]
    pub fn scale_channel(value: u8, brightness: u8) -> u8 {
        (u16::from(value) * u16::from(brightness) / 100).min(255) as u8
    }

    /// Encode one chunk of pixels (writes into an existing buffer to avoid
    /// per-frame allocation).
    pub fn encode_chunk_into(
        packet_no: u8,
        colors: &[Color],
        brightness: u8,
        buffer: &mut Vec<u8>,
    ) {
        buffer.clear();
        buffer.reserve(1 + colors.len() * 3);

        buffer.push(packet_no);
        for color in colors {
            buffer.push(Self::scale_channel(color.r, brightness));
            buffer.push(Self::scale_channel(color.g, brightness));
            buffer.push(Self::scale_channel(color.b, brightness));
        }
    }

    /// Number of datagrams needed for a full frame.
    pub fn chunk_count(led_count: usize, leds_per_packet: usize) -> usize {
        if leds_per_packet == 0 {
            return 0;
        }
        led_count.div_ceil(leds_per_packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_layout_is_seq_byte_then_triplets() {
        let colors = [Color::new(1, 2, 3), Color::new(4, 5, 6)];
        let mut buf = Vec::new();
        NeoPixelProtocol::encode_chunk_into(7, &colors, 100, &mut buf);
        assert_eq!(buf, vec![7, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn brightness_scaling_floors() {
        // (200, 100, 50) at 50% -> (100, 50, 25)
        let colors = [Color::new(200, 100, 50)];
        let mut buf = Vec::new();
        NeoPixelProtocol::encode_chunk_into(0, &colors, 50, &mut buf);
        assert_eq!(&buf[1..], &[100, 50, 25]);

        // Truncation, not rounding: 3 * 50 / 100 = 1.5 -> 1.
        assert_eq!(NeoPixelProtocol::scale_channel(3, 50), 1);
    }

    #[test]
    fn full_brightness_is_identity() {
        for v in [0u8, 1, 127, 254, 255] {
            assert_eq!(NeoPixelProtocol::scale_channel(v, 100), v);
        }
    }

    #[test]
    fn pathological_brightness_is_clamped() {
        assert_eq!(NeoPixelProtocol::scale_channel(255, 200), 255);
    }

    #[test]
    fn chunk_count_rounds_up() {
        assert_eq!(NeoPixelProtocol::chunk_count(300, 128), 3);
        assert_eq!(NeoPixelProtocol::chunk_count(128, 128), 1);
        assert_eq!(NeoPixelProtocol::chunk_count(129, 128), 2);
        assert_eq!(NeoPixelProtocol::chunk_count(0, 128), 0);
    }

    #[test]
    fn encoding_reuses_the_buffer() {
        let mut buf = Vec::new();
        NeoPixelProtocol::encode_chunk_into(0, &[Color::new(9, 9, 9)], 100, &mut buf);
        NeoPixelProtocol::encode_chunk_into(1, &[Color::new(1, 1, 1)], 100, &mut buf);
        assert_eq!(buf, vec![1, 1, 1, 1]);
    }
}
