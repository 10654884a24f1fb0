use crate::{
    core::geo::Point,
    layers::marker::MarkerIcon,
    rendering::{
        glyphs::{char_bits, icon_bits, FONT_ADVANCE, FONT_WIDTH, ICON_SIZE},
        style::Color,
    },
    Result,
};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Raster target for the renderer. All drawing is clipped to the image.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Reallocates the raster; previous contents are discarded
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width() != width || self.height() != height {
            self.image = RgbaImage::new(width, height);
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.width() && y < self.height()).then(|| *self.image.get_pixel(x, y))
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Overwrites every pixel, ignoring alpha blending
    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba();
        for pixel in self.image.pixels_mut() {
            *pixel = rgba;
        }
    }

    /// Source-over blend of `color` onto one pixel
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        *dst = blend(*dst, color);
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Color) {
        let x_end = (x + i64::from(width)).min(i64::from(self.width()));
        let y_end = (y + i64::from(height)).min(i64::from(self.height()));
        for py in y.max(0)..y_end {
            for px in x.max(0)..x_end {
                self.blend_pixel(px, py, color);
            }
        }
    }

    /// Fills every pixel whose center lies within `radius` of `center`
    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.fill_annulus(center, 0.0, radius, color);
    }

    /// Strokes a circle outline `width` pixels wide, centered on `radius`
    pub fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Color) {
        let half = width / 2.0;
        self.fill_annulus(center, (radius - half).max(0.0), radius + half, color);
    }

    fn fill_annulus(&mut self, center: Point, inner: f64, outer: f64, color: Color) {
        let (inner_sq, outer_sq) = (inner * inner, outer * outer);
        let min_x = (center.x - outer).floor().max(0.0) as i64;
        let min_y = (center.y - outer).floor().max(0.0) as i64;
        let max_x = ((center.x + outer).ceil() as i64).min(i64::from(self.width()) - 1);
        let max_y = ((center.y + outer).ceil() as i64).min(i64::from(self.height()) - 1);

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let dx = px as f64 + 0.5 - center.x;
                let dy = py as f64 + 0.5 - center.y;
                let d_sq = dx * dx + dy * dy;
                if d_sq <= outer_sq && (inner <= 0.0 || d_sq >= inner_sq) {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    /// Draws a marker icon centered on `center`
    pub fn draw_icon(&mut self, center: Point, icon: MarkerIcon, color: Color) {
        let half = i64::from(ICON_SIZE / 2);
        let left = center.x.round() as i64 - half;
        let top = center.y.round() as i64 - half;
        for (row, bits) in icon_bits(icon).iter().enumerate() {
            for col in 0..ICON_SIZE {
                if (bits >> (ICON_SIZE - 1 - col)) & 1 == 1 {
                    self.blend_pixel(left + i64::from(col), top + row as i64, color);
                }
            }
        }
    }

    /// Draws text with its top-left corner at (`left`, `top`)
    pub fn draw_text(&mut self, left: i64, top: i64, text: &str, color: Color) {
        let mut x = left;
        for ch in text.chars() {
            for (row, bits) in char_bits(ch).iter().enumerate() {
                for col in 0..FONT_WIDTH {
                    if (bits >> (FONT_WIDTH - 1 - col)) & 1 == 1 {
                        self.blend_pixel(x + i64::from(col), top + row as i64, color);
                    }
                }
            }
            x += i64::from(FONT_ADVANCE);
        }
    }
}

fn blend(dst: Rgba<u8>, src: Color) -> Rgba<u8> {
    match src.a {
        0 => dst,
        255 => src.to_rgba(),
        _ => {
            let sa = f32::from(src.a) / 255.0;
            let da = f32::from(dst[3]) / 255.0;
            let out_a = sa + da * (1.0 - sa);
            let channel = |s: u8, d: u8| {
                let value = (f32::from(s) * sa + f32::from(d) * da * (1.0 - sa)) / out_a;
                value.round().clamp(0.0, 255.0) as u8
            };
            Rgba([
                channel(src.r, dst[0]),
                channel(src.g, dst[1]),
                channel(src.b, dst[2]),
                (out_a * 255.0).round() as u8,
            ])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_and_read_back() {
        let mut surface = Surface::new(4, 3);
        surface.fill(Color::rgb(10, 20, 30));
        assert_eq!(surface.pixel(3, 2), Some(Rgba([10, 20, 30, 255])));
        assert_eq!(surface.pixel(4, 0), None);
    }

    #[test]
    fn test_translucent_blend_over_opaque() {
        let mut surface = Surface::new(1, 1);
        surface.fill(Color::WHITE);
        surface.blend_pixel(0, 0, Color::BLACK.with_opacity(0.2));
        // 255 * (1 - 51/255) = 204
        assert_eq!(surface.pixel(0, 0), Some(Rgba([204, 204, 204, 255])));
    }

    #[test]
    fn test_out_of_bounds_writes_are_clipped() {
        let mut surface = Surface::new(10, 10);
        surface.fill(Color::WHITE);
        surface.fill_circle(Point::new(-50.0, -50.0), 15.0, Color::BLACK);
        surface.fill_rect(-5, 8, 100, 100, Color::BLACK);
        surface.draw_text(-3, -3, "HELLO", Color::BLACK);
        assert_eq!(surface.pixel(0, 9), Some(Rgba([0, 0, 0, 255])));
        assert_eq!(surface.pixel(9, 5), Some(Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_circle_covers_center_not_corners() {
        let mut surface = Surface::new(40, 40);
        surface.fill(Color::WHITE);
        surface.fill_circle(Point::new(20.0, 20.0), 15.0, Color::BLACK);
        assert_eq!(surface.pixel(20, 20), Some(Rgba([0, 0, 0, 255])));
        assert_eq!(surface.pixel(6, 6), Some(Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_ring_leaves_middle_untouched() {
        let mut surface = Surface::new(40, 40);
        surface.fill(Color::WHITE);
        surface.stroke_circle(Point::new(20.0, 20.0), 15.0, 3.0, Color::BLACK);
        assert_eq!(surface.pixel(20, 20), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(surface.pixel(35, 20), Some(Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut surface = Surface::new(4, 4);
        surface.resize(8, 2);
        assert_eq!((surface.width(), surface.height()), (8, 2));
    }
}
