//! Decoded document model and markup writer
//!
//! The decoder builds a [`Document`] out of rows of styled [`Span`]s. Markup
//! syntax only appears here, when the document is written out:
//!
//! ```text
//! <div><span style="color:#aaa;background-color:#000;">C:\&gt;</span>
//! </div>
//! ```

use std::io::Write;

use serde::Serialize;

use crate::core::{escape_markup, Color};
use crate::error::{Error, Result};

const OPEN: &str = "<div>";
const CLOSE: &str = "</div>";

/// 1-based cell coordinate, recorded for per-cell debug spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

/// A styled run of glyphs sharing one attribute byte
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Raw attribute byte shared by every cell of the run
    pub attr: u8,
    pub fg: Color,
    pub bg: Color,
    /// Unescaped glyph text
    pub text: String,
    /// Set only in debug mode, where every span is a single cell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<CellPos>,
}

impl Span {
    pub fn new(attr: u8, fg: Color, bg: Color, glyph: char) -> Self {
        Self {
            attr,
            fg,
            bg,
            text: glyph.to_string(),
            pos: None,
        }
    }

    pub fn at(mut self, pos: CellPos) -> Self {
        self.pos = Some(pos);
        self
    }

    /// Number of cells in this span
    fn cell_count(&self) -> usize {
        self.text.chars().count()
    }

    fn render(&self, out: &mut String) {
        out.push_str("<span ");
        if let Some(pos) = self.pos {
            out.push_str(&format!("data-xy=\"{}x{}\" ", pos.row, pos.col));
        }
        out.push_str("style=\"");
        out.push_str(&self.fg.fg());
        out.push_str(&self.bg.bg());
        out.push_str("\">");
        escape_markup(&self.text, out);
        out.push_str("</span>");
    }
}

/// One screen row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    spans: Vec<Span>,
    cells: usize,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Number of cells written to this row
    pub fn cell_count(&self) -> usize {
        self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells == 0
    }

    /// Start a new span
    pub fn open(&mut self, span: Span) {
        self.cells += span.cell_count();
        self.spans.push(span);
    }

    /// Extend the last span with one more glyph. Returns `false` if the row
    /// has no span yet.
    pub fn extend(&mut self, glyph: char) -> bool {
        match self.spans.last_mut() {
            Some(span) => {
                span.text.push(glyph);
                self.cells += 1;
                true
            }
            None => false,
        }
    }

    /// Attribute byte of the span currently open at the end of the row
    pub fn open_attr(&self) -> Option<u8> {
        self.spans.last().map(|s| s.attr)
    }

    /// Render the row, including its trailing line separator
    pub fn render(&self, out: &mut String) {
        for span in &self.spans {
            span.render(out);
        }
        out.push('\n');
    }
}

/// The decoded screen, in row order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    rows: Vec<Row>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Total number of cells across all rows
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Row::cell_count).sum()
    }

    /// Render the whole document as a markup fragment
    pub fn to_markup(&self) -> String {
        let mut out = String::from(OPEN);
        for row in &self.rows {
            row.render(&mut out);
        }
        out.push_str(CLOSE);
        out
    }
}

/// Write the document to `w`, returning the number of bytes written
pub fn write_document<W: Write + ?Sized>(doc: &Document, w: &mut W) -> Result<u64> {
    let mut written = 0u64;
    let mut put = |s: &str, w: &mut W| -> Result<()> {
        w.write_all(s.as_bytes()).map_err(Error::Write)?;
        written += s.len() as u64;
        Ok(())
    };

    put(OPEN, w)?;
    let mut line = String::new();
    for row in doc.rows() {
        line.clear();
        row.render(&mut line);
        put(&line, w)?;
    }
    put(CLOSE, w)?;
    w.flush().map_err(Error::Write)?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn black() -> Color {
        Color::Short(0, 0, 0)
    }

    fn gray() -> Color {
        Color::Short(0xa, 0xa, 0xa)
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert_eq!(doc.to_markup(), "<div></div>");
        assert_eq!(doc.cell_count(), 0);
    }

    #[test]
    fn test_row_extend_and_render() {
        let mut row = Row::new();
        assert!(!row.extend('x'));
        row.open(Span::new(0x07, gray(), black(), 'd'));
        assert!(row.extend('i'));
        assert!(row.extend('r'));
        assert_eq!(row.cell_count(), 3);
        assert_eq!(row.open_attr(), Some(0x07));

        let mut out = String::new();
        row.render(&mut out);
        assert_eq!(
            out,
            "<span style=\"color:#aaa;background-color:#000;\">dir</span>\n"
        );
    }

    #[test]
    fn test_debug_span_render() {
        let mut row = Row::new();
        row.open(Span::new(0x07, gray(), black(), '<').at(CellPos { row: 2, col: 5 }));
        let mut out = String::new();
        row.render(&mut out);
        assert_eq!(
            out,
            "<span data-xy=\"2x5\" style=\"color:#aaa;background-color:#000;\">&lt;</span>\n"
        );
    }

    #[test]
    fn test_write_document_counts_bytes() {
        let mut row = Row::new();
        row.open(Span::new(0x07, gray(), black(), 'A'));
        let mut doc = Document::new();
        doc.push_row(row);

        let mut out = Vec::new();
        let n = write_document(&doc, &mut out).unwrap();
        assert_eq!(n, out.len() as u64);
        assert_eq!(String::from_utf8(out).unwrap(), doc.to_markup());
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_reported() {
        let err = write_document(&Document::new(), &mut BrokenSink).unwrap_err();
        assert!(matches!(err, Error::Write(_)));
    }
}
