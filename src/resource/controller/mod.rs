pub mod neopixel_udp;
