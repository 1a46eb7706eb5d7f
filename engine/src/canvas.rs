use image::{Rgba, RgbaImage};

use crate::api::DrawCommand;
use crate::color::Color;

/// RGBA raster that draw commands land on. Pixels are replaced, not composited.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::from_pixel(width, height, Rgba(Color::BLACK.to_array())) }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let Rgba([r, g, b, a]) = *self.image.get_pixel(x, y);
        Some(Color::rgba(r, g, b, a))
    }

    pub fn apply_all<'a>(&mut self, commands: impl IntoIterator<Item = &'a DrawCommand>) {
        for command in commands {
            self.apply(command);
        }
    }

    pub fn apply(&mut self, command: &DrawCommand) {
        match *command {
            DrawCommand::ClearCanvas(color) => {
                let px = Rgba(color.to_array());
                for p in self.image.pixels_mut() {
                    *p = px;
                }
            }
            DrawCommand::DrawPoint { x, y, color } => self.put(x as i64, y as i64, color),
            DrawCommand::DrawLine { x0, y0, x1, y1, color, weight } => {
                self.draw_line((x0 as i64, y0 as i64), (x1 as i64, y1 as i64), color, weight)
            }
        }
    }

    fn put(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        self.image.put_pixel(x as u32, y as u32, Rgba(color.to_array()));
    }

    /// Square brush of side `weight`, never thinner than one pixel.
    fn stamp(&mut self, x: i64, y: i64, color: Color, weight: f32) {
        let side = (weight.round() as i64).max(1);
        let lo = -(side - 1) / 2;
        for dy in lo..lo + side {
            for dx in lo..lo + side {
                self.put(x + dx, y + dy, color);
            }
        }
    }

    // Bresenham
    fn draw_line(&mut self, a: (i64, i64), b: (i64, i64), color: Color, weight: f32) {
        let (mut x0, mut y0) = a;
        let (x1, y1) = b;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.stamp(x0, y0, color, weight);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn starts_black_and_clears() {
        let mut c = Canvas::new(4, 3);
        assert_eq!(c.pixel(3, 2), Some(Color::BLACK));
        c.apply(&DrawCommand::ClearCanvas(Color::WHITE));
        assert!(c.as_raw().iter().all(|&b| b == 255));
        assert_eq!(c.pixel(4, 0), None);
    }

    #[test]
    fn points_outside_are_ignored() {
        let mut c = Canvas::new(2, 2);
        c.apply_all(&[
            DrawCommand::DrawPoint { x: 1, y: 1, color: RED },
            DrawCommand::DrawPoint { x: 5, y: 0, color: RED },
        ]);
        assert_eq!(c.pixel(1, 1), Some(RED));
        assert_eq!(c.pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn hairline_covers_exactly_the_column() {
        let mut c = Canvas::new(5, 5);
        c.apply(&DrawCommand::DrawLine { x0: 2, y0: 0, x1: 2, y1: 5, color: RED, weight: 0.5 });
        for y in 0..5 {
            for x in 0..5 {
                let expected = if x == 2 { RED } else { Color::BLACK };
                assert_eq!(c.pixel(x, y), Some(expected));
            }
        }
    }

    #[test]
    fn diagonal_and_thick_lines() {
        let mut c = Canvas::new(4, 4);
        c.apply(&DrawCommand::DrawLine { x0: 0, y0: 0, x1: 3, y1: 3, color: RED, weight: 1.0 });
        for i in 0..4 {
            assert_eq!(c.pixel(i, i), Some(RED));
        }
        assert_eq!(c.pixel(1, 0), Some(Color::BLACK));

        let mut c = Canvas::new(6, 6);
        c.apply(&DrawCommand::DrawLine { x0: 0, y0: 3, x1: 5, y1: 3, color: RED, weight: 3.0 });
        assert_eq!(c.pixel(4, 2), Some(RED));
        assert_eq!(c.pixel(4, 4), Some(RED));
        assert_eq!(c.pixel(4, 0), Some(Color::BLACK));
    }
}
