use std::io;

/// Byte-level access to the LED bus.
pub trait Bus {
    /// One-way write. May accept fewer bytes than offered.
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize>;

    /// Full-duplex transfer: clock out `tx` while capturing the same number
    /// of bytes into `rx`.
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> io::Result<()>;
}

impl<B: Bus + ?Sized> Bus for &mut B {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        (**self).write(bytes)
    }

    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> io::Result<()> {
        (**self).transfer(tx, rx)
    }
}

#[cfg(target_os = "linux")]
pub use self::spi::SpidevBus;

#[cfg(target_os = "linux")]
mod spi {
    use std::io::{self, Write};

    use spidev::{SpiModeFlags, Spidev, SpidevOptions, SpidevTransfer};
    use tracing::{debug, warn};

    use super::Bus;
    use crate::config::BusConfig;
    use crate::error::{Error, Result};

    /// Default `spidev.bufsiz`: the largest single message the kernel takes.
    pub const DEFAULT_BUFSIZ: usize = 4096;

    /// Linux spidev device.
    ///
    /// The kernel rejects single messages larger than the `spidev.bufsiz`
    /// module parameter (4096 bytes by default); raise it for long strings.
    /// The device is closed when this is dropped.
    pub struct SpidevBus {
        spi: Spidev,
        device: String,
    }

    impl SpidevBus {
        /// Open and configure the device named in `config`.
        pub fn open(config: &BusConfig) -> Result<Self> {
            let mode = mode_flags(config.mode).ok_or_else(|| {
                Error::io(
                    format!("setting mode {}", config.mode),
                    io::Error::new(io::ErrorKind::InvalidInput, "SPI mode must be 0-3"),
                )
            })?;

            let mut spi = Spidev::open(&config.device)
                .map_err(|e| Error::io(format!("opening {}", config.device), e))?;

            let options = SpidevOptions::new()
                .mode(mode)
                .bits_per_word(config.bits_per_word)
                .max_speed_hz(config.speed_hz)
                .build();
            spi.configure(&options)
                .map_err(|e| Error::io(format!("configuring {}", config.device), e))?;

            debug!(
                device = %config.device,
                mode = config.mode,
                bits_per_word = config.bits_per_word,
                speed_hz = config.speed_hz,
                "opened SPI bus"
            );

            Ok(SpidevBus {
                spi,
                device: config.device.clone(),
            })
        }

        pub fn device(&self) -> &str {
            &self.device
        }
    }

    impl Bus for SpidevBus {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            let result = self.spi.write(bytes);
            if result.is_err() {
                warn_if_oversized(&self.device, bytes.len());
            }
            result
        }

        fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> io::Result<()> {
            let len = tx.len();
            let mut transfer = SpidevTransfer::read_write(tx, rx);
            let result = self.spi.transfer(&mut transfer);
            if result.is_err() {
                warn_if_oversized(&self.device, len);
            }
            result
        }
    }

    fn exceeds_default_bufsiz(len: usize) -> bool {
        len > DEFAULT_BUFSIZ
    }

    fn warn_if_oversized(device: &str, len: usize) {
        if exceeds_default_bufsiz(len) {
            warn!(
                device,
                bytes = len,
                bufsiz = DEFAULT_BUFSIZ,
                "message larger than the default spidev.bufsiz; raise it or lower probe_capacity"
            );
        }
    }

    fn mode_flags(mode: u8) -> Option<SpiModeFlags> {
        match mode {
            0 => Some(SpiModeFlags::SPI_MODE_0),
            1 => Some(SpiModeFlags::SPI_MODE_1),
            2 => Some(SpiModeFlags::SPI_MODE_2),
            3 => Some(SpiModeFlags::SPI_MODE_3),
            _ => None,
        }
    }

}
