//! Decode options
//!
//! Options come from, in order of precedence:
//! - command line arguments
//! - a TOML options file
//! - built-in defaults (160 columns, no row limit, standard palette, cp437)

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{CodePage, PaletteKind};
use crate::error::{Error, Result};

/// Columns used when no width (or a width of 0) is given
pub const DEFAULT_WIDTH: usize = 160;

/// Options for a single decode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Cells per row before wrapping
    pub width: usize,
    /// Stop after this many rows; 0 reads to the end of the stream.
    ///
    /// Only needed for dumps with trailing NUL bytes or corrupt metadata.
    pub max_rows: usize,
    pub palette: PaletteKind,
    pub code_page: CodePage,
    /// Wrap every cell in its own span tagged with its coordinate
    pub debug: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            max_rows: 0,
            palette: PaletteKind::Standard,
            code_page: CodePage::cp437(),
            debug: false,
        }
    }
}

impl DecodeOptions {
    pub fn new(width: usize, max_rows: usize, palette: PaletteKind, code_page: Option<CodePage>) -> Self {
        Self {
            width,
            max_rows,
            palette,
            code_page: code_page.unwrap_or_default(),
            debug: false,
        }
        .normalized()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Replace a zero width with the default
    pub fn normalized(mut self) -> Self {
        if self.width == 0 {
            self.width = DEFAULT_WIDTH;
        }
        self
    }

    /// Parse options from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str::<Self>(text)
            .map(Self::normalized)
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Load options from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded decode options");
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = DecodeOptions::default();
        assert_eq!(opts.width, 160);
        assert_eq!(opts.max_rows, 0);
        assert_eq!(opts.palette, PaletteKind::Standard);
        assert_eq!(opts.code_page.name(), "cp437");
        assert!(!opts.debug);
    }

    #[test]
    fn test_zero_width_normalized() {
        let opts = DecodeOptions::new(0, 0, PaletteKind::Revised, None);
        assert_eq!(opts.width, DEFAULT_WIDTH);
        assert_eq!(opts.palette, PaletteKind::Revised);
    }

    #[test]
    fn test_from_toml_partial() {
        let opts = DecodeOptions::from_toml("width = 80\npalette = \"revised\"\ncode_page = \"cp865\"\n").unwrap();
        assert_eq!(opts.width, 80);
        assert_eq!(opts.max_rows, 0);
        assert_eq!(opts.palette, PaletteKind::Revised);
        assert_eq!(opts.code_page.name(), "cp865");
    }

    #[test]
    fn test_from_toml_rejects_unknown_code_page() {
        let err = DecodeOptions::from_toml("code_page = \"cp1252\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DecodeOptions::load(Path::new("/nonexistent/binbump.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
