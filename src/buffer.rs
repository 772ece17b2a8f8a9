use crate::color::Rgb;
use crate::encoder::{decode, encode, EncodedSubpixel, SYMBOLS_PER_SUBPIXEL};

/// Encoded bytes per pixel: green, red, blue subpixels.
pub const BYTES_PER_PIXEL: usize = 3 * SYMBOLS_PER_SUBPIXEL;

/// Zeroed pixel-equivalents appended to every frame. 288 idle bytes hold
/// the line low for ~295 us, long enough for the chips to latch.
pub const RESET_TRAILER_PIXELS: usize = 12;

// Subpixel offsets within a pixel, in wire order.
const GREEN: usize = 0;
const RED: usize = SYMBOLS_PER_SUBPIXEL;
const BLUE: usize = 2 * SYMBOLS_PER_SUBPIXEL;

/// One frame of encoded pixels followed by the reset trailer.
///
/// Only indices `0..len()` are addressable; the trailer stays zero for the
/// lifetime of the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixel_count: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer of `pixel_count` dark pixels.
    pub fn new(pixel_count: usize) -> Self {
        let mut data = vec![0u8; (pixel_count + RESET_TRAILER_PIXELS) * BYTES_PER_PIXEL];
        let dark = encode(0);
        for chunk in data[..pixel_count * BYTES_PER_PIXEL].chunks_exact_mut(SYMBOLS_PER_SUBPIXEL) {
            chunk.copy_from_slice(&dark);
        }
        PixelBuffer { pixel_count, data }
    }

    /// Build a buffer sized to `colors`, one pixel per color.
    pub fn from_colors<I>(colors: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Rgb>,
    {
        let colors: Vec<Rgb> = colors.into_iter().map(Into::into).collect();
        let mut buffer = PixelBuffer::new(colors.len());
        for (index, color) in colors.into_iter().enumerate() {
            buffer.set_pixel(index, color);
        }
        buffer
    }

    /// Number of addressable pixels.
    pub fn len(&self) -> usize {
        self.pixel_count
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count == 0
    }

    pub fn set_pixel(&mut self, index: usize, color: Rgb) {
        self.set_green(index, color.green);
        self.set_red(index, color.red);
        self.set_blue(index, color.blue);
    }

    pub fn set_red(&mut self, index: usize, intensity: u8) {
        self.write_subpixel(index, RED, intensity);
    }

    pub fn set_green(&mut self, index: usize, intensity: u8) {
        self.write_subpixel(index, GREEN, intensity);
    }

    pub fn set_blue(&mut self, index: usize, intensity: u8) {
        self.write_subpixel(index, BLUE, intensity);
    }

    /// Read back the color stored at `index`.
    pub fn pixel(&self, index: usize) -> Rgb {
        let read = |offset: usize| {
            let start = self.pixel_offset(index) + offset;
            let mut symbols: EncodedSubpixel = [0; SYMBOLS_PER_SUBPIXEL];
            symbols.copy_from_slice(&self.data[start..start + SYMBOLS_PER_SUBPIXEL]);
            // Addressable bytes are only ever written through encode()
            decode(&symbols).unwrap_or(0)
        };
        Rgb::new(read(RED), read(GREEN), read(BLUE))
    }

    /// Set every addressable pixel dark.
    pub fn clear(&mut self) {
        for index in 0..self.pixel_count {
            self.set_pixel(index, Rgb::BLACK);
        }
    }

    /// The whole physical frame, trailer included, ready for the bus.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.data
    }

    fn pixel_offset(&self, index: usize) -> usize {
        assert!(
            index < self.pixel_count,
            "pixel index {} out of range for buffer of {} pixels",
            index,
            self.pixel_count
        );
        index * BYTES_PER_PIXEL
    }

    fn write_subpixel(&mut self, index: usize, offset: usize, intensity: u8) {
        let start = self.pixel_offset(index) + offset;
        self.data[start..start + SYMBOLS_PER_SUBPIXEL].copy_from_slice(&encode(intensity));
    }
}
