//! Screen dump parser
//!
//! Splits a byte stream into video cells and assembles them into rows of
//! styled spans.

mod cells;
mod state;

pub use cells::{CellReader, VideoCell, CHUNK_SIZE};
pub use state::{Decoder, Flow};
