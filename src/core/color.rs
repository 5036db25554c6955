//! Color palettes for 16-color text mode
//!
//! Supports:
//! - The standard IBM CGA colorset (1981)
//! - The revised CGA colorset measured from a real IBM 5153 monitor
//!
//! The 4-bit color index decoded from an attribute byte selects an entry
//! from one of these 16-entry tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

/// A display color, written as a CSS hexadecimal value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// No color; renders as an empty style directive
    #[default]
    Unset,
    /// 3-digit shorthand, each component a nibble (0x0-0xf)
    Short(u8, u8, u8),
    /// 6-digit RGB value
    Rgb(u8, u8, u8),
}

impl Color {
    /// CSS foreground property, e.g. `color:#aaa;`
    pub fn fg(&self) -> String {
        match self {
            Color::Unset => String::new(),
            _ => format!("color:#{};", self),
        }
    }

    /// CSS background property, e.g. `background-color:#000;`
    pub fn bg(&self) -> String {
        match self {
            Color::Unset => String::new(),
            _ => format!("background-color:#{};", self),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Unset => Ok(()),
            Color::Short(r, g, b) => write!(f, "{r:x}{g:x}{b:x}"),
            Color::Rgb(r, g, b) => write!(f, "{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which built-in palette to decode with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    /// Colors defined by IBM for the Color Graphics Adapter
    #[default]
    Standard,
    /// Colors as displayed by the IBM 5153 monitor, documented by VileR
    Revised,
}

impl FromStr for PaletteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "cga" => Ok(PaletteKind::Standard),
            "revised" | "cga-revised" => Ok(PaletteKind::Revised),
            _ => Err(format!("unknown palette '{s}' (expected standard or revised)")),
        }
    }
}

const STANDARD: [Color; 16] = [
    Color::Short(0x0, 0x0, 0x0), // 00 black
    Color::Short(0x0, 0x0, 0xa), // 01 blue
    Color::Short(0x0, 0xa, 0x0), // 02 green
    Color::Short(0x0, 0xa, 0xa), // 03 cyan
    Color::Short(0xa, 0x0, 0x0), // 04 red
    Color::Short(0xa, 0x0, 0xa), // 05 magenta
    Color::Short(0xa, 0x5, 0x0), // 06 brown
    Color::Short(0xa, 0xa, 0xa), // 07 gray
    Color::Short(0x5, 0x5, 0x5), // 08 intense black
    Color::Short(0x5, 0x5, 0xf), // 09 intense blue
    Color::Short(0x5, 0xf, 0x5), // 10 intense green
    Color::Short(0x5, 0xf, 0xf), // 11 intense cyan
    Color::Short(0xf, 0x5, 0x5), // 12 intense red
    Color::Short(0xf, 0x5, 0xf), // 13 intense magenta
    Color::Short(0xf, 0xf, 0x5), // 14 yellow
    Color::Short(0xf, 0xf, 0xf), // 15 white
];

const REVISED: [Color; 16] = [
    Color::Short(0x0, 0x0, 0x0),
    Color::Rgb(0x00, 0x00, 0xc4),
    Color::Rgb(0x00, 0xc4, 0x00),
    Color::Rgb(0x00, 0xc4, 0xc4),
    Color::Rgb(0xc4, 0x00, 0x00),
    Color::Rgb(0xc4, 0x00, 0xc4),
    Color::Rgb(0xc4, 0x7e, 0x00),
    Color::Rgb(0xc4, 0xc4, 0xc4),
    Color::Rgb(0x4e, 0x4e, 0x4e),
    Color::Rgb(0x4e, 0x4e, 0xdc),
    Color::Rgb(0x4e, 0xdc, 0x4e),
    Color::Rgb(0x4e, 0xf3, 0xf3),
    Color::Rgb(0xdc, 0x4e, 0x4e),
    Color::Rgb(0xf3, 0x4e, 0xf3),
    Color::Rgb(0xf3, 0xf3, 0x4e),
    Color::Short(0xf, 0xf, 0xf),
];

/// A fixed 16-entry color table, selected once per decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    kind: PaletteKind,
    colors: [Color; 16],
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(PaletteKind::Standard)
    }
}

impl Palette {
    pub fn new(kind: PaletteKind) -> Self {
        let colors = match kind {
            PaletteKind::Standard => STANDARD,
            PaletteKind::Revised => REVISED,
        };
        Self { kind, colors }
    }

    pub fn kind(&self) -> PaletteKind {
        self.kind
    }

    /// Look up a 4-bit color index, `None` if the index is above 15
    pub fn color_for(&self, index: u8) -> Option<Color> {
        self.colors.get(usize::from(index)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_css_properties() {
        let gray = Color::Short(0xa, 0xa, 0xa);
        assert_eq!(gray.fg(), "color:#aaa;");
        assert_eq!(gray.bg(), "background-color:#aaa;");

        let brown = Color::Rgb(0xc4, 0x7e, 0x00);
        assert_eq!(brown.fg(), "color:#c47e00;");
    }

    #[test]
    fn test_unset_color_renders_empty() {
        assert_eq!(Color::Unset.fg(), "");
        assert_eq!(Color::Unset.bg(), "");
        assert_eq!(Color::default(), Color::Unset);
    }

    #[test]
    fn test_standard_palette() {
        let pal = Palette::new(PaletteKind::Standard);
        assert_eq!(pal.color_for(0).map(|c| c.to_string()).as_deref(), Some("000"));
        assert_eq!(pal.color_for(8).map(|c| c.to_string()).as_deref(), Some("555"));
        assert_eq!(pal.color_for(14).map(|c| c.to_string()).as_deref(), Some("ff5"));
        assert_eq!(pal.color_for(16), None);
    }

    #[test]
    fn test_revised_palette() {
        let pal = Palette::new(PaletteKind::Revised);
        assert_eq!(pal.color_for(8).map(|c| c.to_string()).as_deref(), Some("4e4e4e"));
        assert_eq!(pal.color_for(6).map(|c| c.to_string()).as_deref(), Some("c47e00"));
    }

    #[test]
    fn test_palettes_share_black_and_white_only() {
        let standard = Palette::new(PaletteKind::Standard);
        let rev = Palette::new(PaletteKind::Revised);
        for i in 0..16u8 {
            let same = standard.color_for(i).map(|c| c.fg()) == rev.color_for(i).map(|c| c.fg());
            assert_eq!(same, i == 0 || i == 15, "index {i}");
        }
    }

    #[test]
    fn test_palette_kind_from_str() {
        assert_eq!("standard".parse::<PaletteKind>(), Ok(PaletteKind::Standard));
        assert_eq!("Revised".parse::<PaletteKind>(), Ok(PaletteKind::Revised));
        assert_eq!(
            "VGA".parse::<PaletteKind>(),
            Err("unknown palette 'VGA' (expected standard or revised)".to_string())
        );
    }
}
