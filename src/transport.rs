use std::io;

use tracing::{debug, trace, warn};

use crate::buffer::{PixelBuffer, BYTES_PER_PIXEL, RESET_TRAILER_PIXELS};
use crate::bus::Bus;
use crate::config::DEFAULT_PROBE_CAPACITY;
use crate::error::{Error, Result};

/// Sends frames over a [`Bus`] and counts the pixels attached to it.
///
/// Owns the bus for its whole lifetime; dropping the transport releases it.
pub struct Transport<B> {
    bus: B,
    probe_capacity: usize,
}

impl<B: Bus> Transport<B> {
    pub fn new(bus: B) -> Self {
        Transport {
            bus,
            probe_capacity: DEFAULT_PROBE_CAPACITY,
        }
    }

    /// Size the probe frame for up to `capacity` pixels.
    pub fn with_probe_capacity(mut self, capacity: usize) -> Self {
        self.probe_capacity = capacity;
        self
    }

    pub fn probe_capacity(&self) -> usize {
        self.probe_capacity
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn into_inner(self) -> B {
        self.bus
    }

    /// Write the whole frame, trailer included.
    ///
    /// Short writes are continued from where the bus stopped. Any error is
    /// returned immediately without retrying.
    pub fn send(&mut self, buffer: &PixelBuffer) -> Result<()> {
        let frame = buffer.raw_bytes();
        debug!(pixels = buffer.len(), bytes = frame.len(), "sending frame");
        trace!("frame: {}", hex_dump(frame));

        let mut remaining = frame;
        let mut writes = 0usize;
        while !remaining.is_empty() {
            let wrote = self
                .bus
                .write(remaining)
                .map_err(|e| Error::io("writing frame", e))?;
            writes += 1;
            if wrote == 0 {
                return Err(Error::io(
                    "writing frame",
                    io::Error::new(io::ErrorKind::WriteZero, "bus accepted no bytes"),
                ));
            }
            remaining = &remaining[wrote.min(remaining.len())..];
        }

        if writes > 1 {
            debug!(writes, "frame needed multiple writes");
        }
        Ok(())
    }

    /// Send an all-dark frame of `pixel_count` pixels.
    pub fn blank(&mut self, pixel_count: usize) -> Result<()> {
        self.send(&PixelBuffer::new(pixel_count))
    }

    /// Count the connected pixels.
    ///
    /// Clocks out an idle frame (all zero bytes) sized to the probe
    /// capacity while reading back the echo. Installed pixels echo their
    /// share of the frame back as zeros; the first pixel position with a
    /// nonzero byte in its echo is the pixel count. If every position
    /// echoes back zero the string may be longer than the probe, so the
    /// count is reported as indeterminate.
    pub fn probe(&mut self) -> Result<usize> {
        let addressable = self.probe_capacity * BYTES_PER_PIXEL;
        let sent = vec![0u8; addressable + RESET_TRAILER_PIXELS * BYTES_PER_PIXEL];
        let mut echoed = vec![0u8; sent.len()];

        self.bus.transfer(&sent, &mut echoed).map_err(|e| {
            warn!(bytes = sent.len(), "probe transfer failed");
            Error::io("tx/rx SPI message", e)
        })?;
        trace!("probe echo: {}", hex_dump(&echoed));

        let divergence = echoed[..addressable]
            .chunks_exact(BYTES_PER_PIXEL)
            .position(|back| back.iter().any(|&b| b != 0));

        match divergence {
            Some(count) => {
                debug!(count, "probe found pixels");
                Ok(count)
            }
            None => {
                debug!(capacity = self.probe_capacity, "probe saw no divergence");
                Err(Error::CountIndeterminate {
                    capacity: self.probe_capacity,
                })
            }
        }
    }
}

fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
