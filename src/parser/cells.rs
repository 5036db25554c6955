//! Byte-pair tokenizer
//!
//! Splits a raw dump into (character, attribute) cells. The reader is
//! consumed in bounded chunks, so arbitrarily large dumps never need to be
//! held in memory at once.

use std::io::{ErrorKind, Read};

use crate::error::{Error, Result};

/// Size of the read buffer
pub const CHUNK_SIZE: usize = 64 * 1024;

/// One character/attribute pair from video memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoCell {
    pub ch: u8,
    pub attr: u8,
}

impl VideoCell {
    pub fn new(ch: u8, attr: u8) -> Self {
        Self { ch, attr }
    }
}

/// Streaming iterator over the cells of a dump
///
/// A final unpaired byte is dropped. A read error ends the iteration after
/// it has been yielded once.
#[derive(Debug)]
pub struct CellReader<R> {
    inner: R,
    buf: Vec<u8>,
    pos: usize,
    len: usize,
    done: bool,
    bytes_read: u64,
}

impl<R: Read> CellReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_capacity(CHUNK_SIZE, inner)
    }

    /// Create a reader with a custom chunk size (minimum 2 bytes)
    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            inner,
            buf: vec![0; capacity.max(2)],
            pos: 0,
            len: 0,
            done: false,
            bytes_read: 0,
        }
    }

    /// Total bytes pulled from the underlying reader so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Refill the buffer. Returns `Ok(false)` at end of stream.
    fn fill(&mut self) -> Result<bool> {
        loop {
            match self.inner.read(&mut self.buf) {
                Ok(0) => return Ok(false),
                Ok(n) => {
                    self.pos = 0;
                    self.len = n;
                    self.bytes_read += n as u64;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Read(e)),
            }
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        if self.pos == self.len && !self.fill()? {
            return Ok(None);
        }
        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(Some(b))
    }

    fn next_cell(&mut self) -> Result<Option<VideoCell>> {
        let Some(ch) = self.next_byte()? else {
            return Ok(None);
        };
        match self.next_byte()? {
            Some(attr) => Ok(Some(VideoCell::new(ch, attr))),
            None => {
                tracing::warn!(byte = ch, "discarding unpaired trailing byte");
                Ok(None)
            }
        }
    }
}

impl<R: Read> Iterator for CellReader<R> {
    type Item = Result<VideoCell>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_cell() {
            Ok(Some(cell)) => Some(Ok(cell)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for CellReader<R> {}
