//! Drive WS2812-style pixel strings from a Linux SPI bus.
//!
//! Intensities are expanded into SPI bytes whose high-time reproduces the
//! LED protocol's pulse widths ([`encoder`]), packed into a frame with a
//! trailing reset gap ([`buffer`]), and written out or used to count the
//! attached pixels ([`transport`]).

pub mod buffer;
pub mod bus;
pub mod color;
pub mod config;
pub mod encoder;
pub mod error;
pub mod transport;

pub use buffer::PixelBuffer;
pub use bus::Bus;
#[cfg(target_os = "linux")]
pub use bus::SpidevBus;
pub use color::Rgb;
pub use config::{BusConfig, Config};
pub use error::{Error, Result};
pub use transport::Transport;
