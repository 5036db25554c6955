//! Text Mode Core Module
//!
//! The fixed tables and pure functions of PC text mode:
//! - Attribute byte decoding
//! - 16-color palettes
//! - Code page glyph mapping and markup escaping

mod attr;
mod charset;
mod color;

pub use attr::{decode_attr, Attribute};
pub use charset::{escape_markup, CodePage};
pub use color::{Color, Palette, PaletteKind};
