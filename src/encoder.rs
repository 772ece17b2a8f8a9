//! Intensity to bus-symbol encoding.
//!
//! Each intensity bit becomes one SPI byte. Clocked out at
//! [`BUS_SPEED_HZ`] a byte lasts ~1.03 us, which is one LED bit period.
//! The number of leading high bits in the byte sets the pulse width the LED
//! samples: [`ONE`] holds the line high for ~770 ns, [`ZERO`] for ~385 ns.

/// SPI clock the symbol constants are tuned for.
pub const BUS_SPEED_HZ: u32 = 7_800_000;

/// Long pulse, logical 1.
pub const ONE: u8 = 0xFC;

/// Short pulse, logical 0.
pub const ZERO: u8 = 0xE0;

/// Bus bytes per 8-bit intensity.
pub const SYMBOLS_PER_SUBPIXEL: usize = 8;

pub type EncodedSubpixel = [u8; SYMBOLS_PER_SUBPIXEL];

/// Encode an intensity, most significant bit first.
pub const fn encode(intensity: u8) -> EncodedSubpixel {
    let mut symbols = [ZERO; SYMBOLS_PER_SUBPIXEL];
    let mut i = 0;
    while i < SYMBOLS_PER_SUBPIXEL {
        if intensity & (0x80 >> i) != 0 {
            symbols[i] = ONE;
        }
        i += 1;
    }
    symbols
}

/// Recover the intensity from its symbols. Returns `None` if any byte is
/// not a valid symbol (e.g. the zeroed reset trailer).
pub fn decode(symbols: &EncodedSubpixel) -> Option<u8> {
    symbols.iter().try_fold(0u8, |acc, &symbol| match symbol {
        ONE => Some((acc << 1) | 1),
        ZERO => Some(acc << 1),
        _ => None,
    })
}
