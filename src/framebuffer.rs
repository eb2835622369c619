use std::path::Path;

use ultraviolet::Vec3;

/// RGBA8 pixel buffer addressed by (row, col) with row 0 at the bottom of
/// the image; the vertical flip happens on write.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixel_data: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            pixel_data: vec![0; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Quantize a color to 8 bits per channel and store it. Channels above
    /// 1.0 saturate at 255.
    pub fn set_pixel(&mut self, row: usize, col: usize, color: Vec3) {
        let flipped = self.height - 1 - row;
        let start = (flipped * self.width + col) * 4;
        self.pixel_data[start] = (color.x * 255.0) as u8;
        self.pixel_data[start + 1] = (color.y * 255.0) as u8;
        self.pixel_data[start + 2] = (color.z * 255.0) as u8;
        self.pixel_data[start + 3] = 255;
    }

    pub fn pixel(&self, row: usize, col: usize) -> [u8; 4] {
        let flipped = self.height - 1 - row;
        let start = (flipped * self.width + col) * 4;
        self.pixel_data[start..start + 4].try_into().unwrap()
    }

    pub fn save(&self, path: &Path) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.pixel_data,
            self.width as u32,
            self.height as u32,
            image::ColorType::Rgba8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_zero_lands_at_the_bottom() {
        let mut frame = FrameBuffer::new(2, 3);
        frame.set_pixel(0, 0, Vec3::new(1.0, 0.0, 0.0));

        // Bottom row of the image is the last row of the byte buffer.
        let start = (2 * 2) * 4;
        assert_eq!(frame.pixel_data[start], 255);
        assert_eq!(frame.pixel_data[start + 3], 255);
        assert_eq!(frame.pixel(0, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn channels_quantize_and_saturate() {
        let mut frame = FrameBuffer::new(1, 1);
        frame.set_pixel(0, 0, Vec3::new(0.5, 2.0, -1.0));
        let [r, g, b, a] = frame.pixel(0, 0);
        assert_eq!(r, 127);
        assert_eq!(g, 255);
        assert_eq!(b, 0);
        assert_eq!(a, 255);
    }
}
