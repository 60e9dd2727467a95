//! ESC/POS command builder
//!
//! Fluent API for assembling ESC/POS print jobs. Text is written as
//! UTF-8 for printers with a Unicode-capable driver font; Tamil content
//! that the device font cannot shape should be shipped through
//! [`raster`](EscPosBuilder::raster) instead, which encodes a composed
//! image as GS v 0 bit graphics.

#[cfg(feature = "image")]
use image::RgbImage;

/// ESC/POS command builder
pub struct EscPosBuilder {
    buf: Vec<u8>,
}

impl EscPosBuilder {
    /// Create a new builder, starting with printer initialization (ESC @)
    pub fn new() -> Self {
        let mut buf = Vec::with_capacity(4096);
        buf.extend_from_slice(&[0x1B, 0x40]);
        Self { buf }
    }

    // === Text Output ===

    /// Write raw UTF-8 text
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    /// Print and feed n lines (ESC d n)
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x64, lines]);
        self
    }

    // === Alignment ===

    /// Align text to center
    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    /// Align text to left (default)
    pub fn left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x00]);
        self
    }

    /// Align text to right
    pub fn right(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x02]);
        self
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    /// Double width and height
    pub fn double_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x11]);
        self
    }

    /// Reset to normal size
    pub fn reset_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]);
        self
    }

    // === Raster Graphics ===

    /// Encode an RGB image as GS v 0 raster graphics, centered.
    ///
    /// The image is thresholded to 1-bit: pixels with luma below 128
    /// print black. Images wider than `max_width` dots are clamped by
    /// dropping rightmost columns; composition is expected to have sized
    /// the image for the paper already (384 dots for 58/80mm heads).
    #[cfg(feature = "image")]
    pub fn raster(&mut self, img: &RgbImage, max_width: u32) -> &mut Self {
        let w = img.width().min(max_width).max(1);
        let h = img.height();
        let x_bytes = w.div_ceil(8);

        // Center align for the image block
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);

        // GS v 0 m xL xH yL yH
        self.buf.extend_from_slice(&[0x1D, 0x76, 0x30, 0x00]);
        self.buf.push(x_bytes as u8);
        self.buf.push((x_bytes >> 8) as u8);
        self.buf.push(h as u8);
        self.buf.push((h >> 8) as u8);

        for y in 0..h {
            for x_byte in 0..x_bytes {
                let mut byte = 0u8;
                for bit in 0..8 {
                    let x = x_byte * 8 + bit;
                    if x < w {
                        let p = img.get_pixel(x, y);
                        let luma = (0.299 * p.0[0] as f32
                            + 0.587 * p.0[1] as f32
                            + 0.114 * p.0[2] as f32) as u8;
                        if luma < 128 {
                            byte |= 1 << (7 - bit);
                        }
                    }
                }
                self.buf.push(byte);
            }
        }

        self.buf.push(0x0A);
        self
    }

    // === Paper Control ===

    /// Cut paper (GS V 0, full cut)
    pub fn cut(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x00]);
        self
    }

    /// Full cut after feeding n lines (GS V 66 n). Lets the printer
    /// manage cutter-to-head distance, wasting less top margin on the
    /// next ticket than separate feed + cut calls.
    pub fn cut_feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x42, lines]);
        self
    }

    // === Build ===

    /// Finalize the job bytes
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_starts_with_init() {
        let b = EscPosBuilder::new();
        assert_eq!(&b.build()[..2], &[0x1B, 0x40]);
    }

    #[test]
    fn test_text_and_style_commands() {
        let mut b = EscPosBuilder::new();
        b.center().bold().line("மொத்தம்").bold_off().left();
        let data = b.build();
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("மொத்தம்"));
        // bold on/off markers present
        assert!(data.windows(3).any(|w| w == [0x1B, 0x45, 0x01]));
        assert!(data.windows(3).any(|w| w == [0x1B, 0x45, 0x00]));
    }

    #[test]
    fn test_cut_feed_encodes_line_count() {
        let mut b = EscPosBuilder::new();
        b.cut_feed(4);
        let data = b.build();
        assert_eq!(&data[data.len() - 4..], &[0x1D, 0x56, 0x42, 4]);
    }

    #[cfg(feature = "image")]
    #[test]
    fn test_raster_emits_bit_image_header() {
        let img = RgbImage::from_pixel(16, 4, image::Rgb([0, 0, 0]));
        let mut b = EscPosBuilder::new();
        b.raster(&img, 384);
        let data = b.build();
        let pos = data
            .windows(4)
            .position(|w| w == [0x1D, 0x76, 0x30, 0x00])
            .expect("raster header present");
        // 16 dots -> 2 bytes per row, 4 rows
        assert_eq!(data[pos + 4], 2);
        assert_eq!(data[pos + 6], 4);
        // All-black image: payload bytes are 0xFF
        assert!(data[pos + 8..pos + 8 + 8].iter().all(|&b| b == 0xFF));
    }
}
