/// Half-block presenter: two framebuffer rows per terminal row
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use sr3d_core::Color;

/// Upper half block; foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '\u{2580}';

/// Maps a packed pixel buffer onto terminal cells
pub struct BlockRenderer {
    columns: u16,
    rows: u16,
    top: u16,
}

impl BlockRenderer {
    /// `rows` text rows starting at row `top`
    pub fn new(columns: u16, rows: u16, top: u16) -> Self {
        Self { columns, rows, top }
    }

    /// Framebuffer size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.columns as u32, self.rows as u32 * 2)
    }

    pub fn pixel_count(&self) -> usize {
        let (width, height) = self.pixel_size();
        width as usize * height as usize
    }

    /// Colors for the cell at `column`, `row`: (upper pixel, lower pixel)
    pub fn cell(&self, pixels: &[u32], column: u16, row: u16) -> (Color, Color) {
        let width = self.columns as usize;
        let upper = row as usize * 2 * width + column as usize;
        let lower = upper + width;
        (Color(pixels[upper]), Color(pixels[lower]))
    }

    pub fn draw<W: Write>(&self, pixels: &[u32], writer: &mut W) -> std::io::Result<()> {
        debug_assert!(pixels.len() >= self.pixel_count());

        let mut current: Option<(Color, Color)> = None;
        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, self.top + row))?;
            for column in 0..self.columns {
                let (upper, lower) = self.cell(pixels, column, row);

                // Only emit color changes
                if current.map_or(true, |(fg, _)| fg != upper) {
                    writer.queue(SetForegroundColor(term_color(upper)))?;
                }
                if current.map_or(true, |(_, bg)| bg != lower) {
                    writer.queue(SetBackgroundColor(term_color(lower)))?;
                }
                current = Some((upper, lower));

                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.red(),
        g: color.green(),
        b: color.blue(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_pixel_rows_per_cell() {
        let renderer = BlockRenderer::new(3, 2, 1);
        assert_eq!(renderer.pixel_size(), (3, 4));

        let mut pixels = vec![Color::BLACK.0; renderer.pixel_count()];
        // Row 2 is the upper half of the second text row
        pixels[2 * 3 + 1] = Color::RED.0;
        pixels[3 * 3 + 1] = Color::BLUE.0;

        assert_eq!(renderer.cell(&pixels, 1, 1), (Color::RED, Color::BLUE));
        assert_eq!(renderer.cell(&pixels, 1, 0), (Color::BLACK, Color::BLACK));
    }

    #[test]
    fn test_draw_emits_one_glyph_per_cell() {
        let renderer = BlockRenderer::new(4, 3, 0);
        let pixels = vec![Color::GREEN.0; renderer.pixel_count()];

        let mut out = Vec::new();
        renderer.draw(&pixels, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches(HALF_BLOCK).count(), 12);
        // A uniform frame sets each color once
        assert_eq!(text.matches("38;2;0;255;0").count(), 1);
    }
}
