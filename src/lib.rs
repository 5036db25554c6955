//! binbump
//!
//! Converts binary screen dumps of IBM PC text mode video memory into HTML.
//! A dump is a headerless sequence of (character, attribute) byte pairs; each
//! pair becomes a glyph from an 8-bit code page styled with CGA colors.
//!
//! - `core`: attribute decoding, palettes, code pages
//! - `parser`: byte-pair tokenizer and the row/span decoder
//! - `document`: the decoded rows and the markup writer
//!
//! ```
//! let html = binbump::decode_to_text(&[0x41u8, 0x07][..]).unwrap();
//! assert_eq!(html, "<div><span style=\"color:#aaa;background-color:#000;\">A</span>\n</div>");
//! ```
//!
//! The fragment should be placed inside a `<pre>` element styled with a
//! monospace font that covers the code page's glyphs.

pub mod config;
pub mod core;
pub mod document;
pub mod error;
pub mod parser;

use std::io::{Read, Write};

pub use config::{DecodeOptions, DEFAULT_WIDTH};
pub use crate::core::{CodePage, Color, Palette, PaletteKind};
pub use document::{write_document, Document};
pub use error::{Error, Result};
pub use parser::Decoder;

/// Decode a dump into its structured document
pub fn decode_document<R: Read>(reader: R, options: &DecodeOptions) -> Result<Document> {
    Decoder::new(options).decode(reader)
}

/// Decode a dump into a buffer of HTML
pub fn decode_to_buffer<R: Read>(reader: R, options: &DecodeOptions) -> Result<Vec<u8>> {
    let doc = decode_document(reader, options)?;
    let mut buf = Vec::new();
    write_document(&doc, &mut buf)?;
    Ok(buf)
}

/// Decode a dump with the default options (160 columns, standard palette,
/// code page 437)
pub fn decode_to_bytes<R: Read>(reader: R) -> Result<Vec<u8>> {
    decode_to_buffer(reader, &DecodeOptions::default())
}

/// Decode a dump with the default options into a string
pub fn decode_to_text<R: Read>(reader: R) -> Result<String> {
    let doc = decode_document(reader, &DecodeOptions::default())?;
    Ok(doc.to_markup())
}

/// Decode a dump with the default options and write the HTML to `writer`.
///
/// Returns the number of bytes written.
pub fn decode_and_write<R: Read, W: Write>(reader: R, mut writer: W) -> Result<u64> {
    let doc = decode_document(reader, &DecodeOptions::default())?;
    write_document(&doc, &mut writer)
}
