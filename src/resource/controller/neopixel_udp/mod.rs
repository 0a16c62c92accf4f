//! Fire-and-forget UDP transport for NeoPixel strips.
//!
//! The socket is bound once to an ephemeral local port and kept for the
//! endpoint's lifetime; the transport is connectionless, so "apply settings"
//! only re-resolves the target address. Delivery is best-effort: no retry,
//! no acknowledgement, no flow control.

use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use crate::config::EndpointConfig;
use crate::interface::controller::{Color, Controller};

mod protocol;
pub use protocol::NeoPixelProtocol;

use protocol::PROBE;

pub struct NeoPixelUdpController {
    addr: SocketAddr,
    socket: UdpSocket,
    /// Single-chunk pixel cap, from the endpoint settings.
    leds_per_packet: usize,
    /// Reused encode buffer, sized for one full chunk.
    frame_buffer: Vec<u8>,
}

impl NeoPixelUdpController {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self, String> {
        let addr = Self::resolve(endpoint)?;

        let socket =
            UdpSocket::bind("0.0.0.0:0").map_err(|e| format!("Failed to bind socket: {}", e))?;

        let leds_per_packet = endpoint.leds_per_packet;
        if leds_per_packet == 0 {
            return Err("leds_per_packet must be at least 1".to_string());
        }

        log::debug!(addr:display = addr; "NeoPixel UDP controller ready");

        Ok(Self {
            addr,
            socket,
            leds_per_packet,
            frame_buffer: Vec::with_capacity(1 + leds_per_packet * 3),
        })
    }

    fn resolve(endpoint: &EndpointConfig) -> Result<SocketAddr, String> {
        (endpoint.host.as_str(), endpoint.port)
            .to_socket_addrs()
            .map_err(|e| format!("Invalid endpoint address '{}:{}': {}", endpoint.host, endpoint.port, e))?
            .next()
            .ok_or_else(|| {
                format!(
                    "Endpoint '{}:{}' did not resolve to any address",
                    endpoint.host, endpoint.port
                )
            })
    }

    fn send(&self, data: &[u8]) -> Result<(), String> {
        self.socket
            .send_to(data, self.addr)
            .map_err(|e| format!("Failed to send UDP packet: {}", e))?;
        Ok(())
    }
}

impl Controller for NeoPixelUdpController {
    fn endpoint(&self) -> String {
        self.addr.to_string()
    }

    fn model(&self) -> String {
        "NeoPixel UDP strip".to_string()
    }

    fn update(&mut self, colors: &[Color], brightness: u8) -> Result<(), String> {
        let mut packet_no: u8 = 0;
        for chunk in colors.chunks(self.leds_per_packet) {
            NeoPixelProtocol::encode_chunk_into(
                packet_no,
                chunk,
                brightness,
                &mut self.frame_buffer,
            );
            self.send(&self.frame_buffer)?;
            // Wraps past 255 packets; frames that large are firmware-defined.
            packet_no = packet_no.wrapping_add(1);
        }
        Ok(())
    }

    fn reconfigure(&mut self, endpoint: &EndpointConfig) -> Result<(), String> {
        let addr = Self::resolve(endpoint)?;
        if endpoint.leds_per_packet == 0 {
            return Err("leds_per_packet must be at least 1".to_string());
        }
        self.addr = addr;
        self.leds_per_packet = endpoint.leds_per_packet;
        log::info!(addr:display = self.addr; "NeoPixel endpoint re-targeted");
        Ok(())
    }

    fn is_reachable(&self) -> bool {
        match self.socket.send_to(&PROBE, self.addr) {
            Ok(_) => true,
            Err(e) => {
                log::warn!(addr:display = self.addr, err:display = e; "Probe send failed");
                false
            }
        }
    }
}
