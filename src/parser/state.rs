//! Decoder State Machine
//!
//! Assembles video cells into rows of styled spans.
//!
//! # State Machine
//!
//! ```text
//! AwaitingCell -> (ExtendRun | StartRun) -> RowBoundary -> AwaitingCell
//!                                                       -> Terminal
//! ```
//!
//! Consecutive cells on a row with the same raw attribute byte are merged
//! into one span, so long single-color stretches become a single element.
//! In debug mode no merging happens and each cell keeps its coordinate.
//! Runs never cross a row boundary.

use std::io::Read;

use super::cells::{CellReader, VideoCell};
use crate::config::DecodeOptions;
use crate::core::{decode_attr, CodePage, Palette};
use crate::document::{CellPos, Document, Row, Span};
use crate::error::Result;

/// Whether the decoder wants more cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The row limit was reached; remaining input must not be read
    Stop,
}

/// Mutable state of one decode, never shared between decodes
#[derive(Debug, Default)]
struct DecoderState {
    /// 1-based column of the next cell
    column: usize,
    /// 1-based index of the row being filled
    row: usize,
    current: Row,
    document: Document,
    truncated: bool,
}

impl DecoderState {
    fn new() -> Self {
        Self {
            column: 1,
            row: 1,
            ..Default::default()
        }
    }
}

/// Screen dump decoder
#[derive(Debug)]
pub struct Decoder {
    palette: Palette,
    code_page: CodePage,
    width: usize,
    max_rows: usize,
    debug: bool,
    state: DecoderState,
}

impl Decoder {
    /// Create a decoder with fresh state
    pub fn new(options: &DecodeOptions) -> Self {
        let options = options.clone().normalized();
        Self {
            palette: Palette::new(options.palette),
            code_page: options.code_page,
            width: options.width,
            max_rows: options.max_rows,
            debug: options.debug,
            state: DecoderState::new(),
        }
    }

    /// Rows closed so far
    pub fn rows_written(&self) -> usize {
        self.state.document.rows().len()
    }

    /// Whether the row limit cut the decode short
    pub fn is_truncated(&self) -> bool {
        self.state.truncated
    }

    /// Feed one cell
    pub fn push(&mut self, cell: VideoCell) -> Result<Flow> {
        if self.state.truncated {
            return Ok(Flow::Stop);
        }

        let attr = decode_attr(cell.attr).validate(cell.attr)?;
        let glyph = self.code_page.glyph(cell.ch);

        let state = &mut self.state;
        let merged = !self.debug
            && state.current.open_attr() == Some(cell.attr)
            && state.current.extend(glyph);
        if !merged {
            let fg = self.palette.color_for(attr.fg).unwrap_or_default();
            let bg = self.palette.color_for(attr.bg).unwrap_or_default();
            let mut span = Span::new(cell.attr, fg, bg, glyph);
            if self.debug {
                span = span.at(CellPos {
                    row: state.row,
                    col: state.column,
                });
            }
            state.current.open(span);
        }

        if state.column < self.width {
            state.column += 1;
            return Ok(Flow::Continue);
        }

        self.close_row();
        if self.max_rows > 0 && self.rows_written() >= self.max_rows {
            tracing::warn!(max_rows = self.max_rows, "row limit reached, ignoring remaining input");
            self.state.truncated = true;
            return Ok(Flow::Stop);
        }
        Ok(Flow::Continue)
    }

    fn close_row(&mut self) {
        let state = &mut self.state;
        let row = std::mem::take(&mut state.current);
        tracing::trace!(row = state.row, spans = row.spans().len(), "row closed");
        state.document.push_row(row);
        state.row += 1;
        state.column = 1;
    }

    /// Flush a partially filled last row and return the document
    pub fn finish(mut self) -> Document {
        if !self.state.truncated && !self.state.current.is_empty() {
            self.close_row();
        }
        self.state.document
    }

    /// Decode an entire stream
    pub fn decode<R: Read>(mut self, reader: R) -> Result<Document> {
        tracing::debug!(
            width = self.width,
            max_rows = self.max_rows,
            palette = ?self.palette.kind(),
            code_page = self.code_page.name(),
            debug = self.debug,
            "decoding screen dump"
        );
        let mut cells = CellReader::new(reader);
        for cell in cells.by_ref() {
            if self.push(cell?)? == Flow::Stop {
                break;
            }
        }
        let bytes_read = cells.bytes_read();
        let doc = self.finish();
        tracing::debug!(
            bytes_read,
            rows = doc.rows().len(),
            cells = doc.cell_count(),
            "decode finished"
        );
        Ok(doc)
    }
}
