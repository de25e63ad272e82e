/// Packed 32-bit ARGB colors as stored in the pixel buffer
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0xff00_0000);
    pub const WHITE: Color = Color(0xffff_ffff);
    pub const RED: Color = Color(0xffff_0000);
    pub const GREEN: Color = Color(0xff00_ff00);
    pub const BLUE: Color = Color(0xff00_00ff);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Fully opaque color
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(0xff, r, g, b)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::RED
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_and_unpack() {
        let color = Color::from_argb(0x12, 0x34, 0x56, 0x78);
        assert_eq!(color.0, 0x1234_5678);
        assert_eq!(color.alpha(), 0x12);
        assert_eq!(color.red(), 0x34);
        assert_eq!(color.green(), 0x56);
        assert_eq!(color.blue(), 0x78);
    }

    #[test]
    fn test_named_colors_are_opaque() {
        assert_eq!(Color::from_rgb(0xff, 0, 0), Color::RED);
        assert_eq!(Color::BLACK.alpha(), 0xff);
        assert_eq!(u32::from(Color::default()), 0xffff_0000);
    }
}
