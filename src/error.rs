//! Error types for decoding screen dumps

use std::io;
use thiserror::Error;

/// Decode error type
#[derive(Error, Debug)]
pub enum Error {
    /// No input stream was supplied
    #[error("no input stream supplied")]
    MissingInput,

    /// A decoded color index is outside the 16-color range
    #[error("data is not a video binary dump: attribute {attr:#04X} gives fg {fg}, bg {bg} (max 15)")]
    InvalidAttribute { attr: u8, fg: u8, bg: u8 },

    /// The input stream failed mid-read
    #[error("failed to read input stream: {0}")]
    Read(io::Error),

    /// The output sink failed
    #[error("failed to write output: {0}")]
    Write(io::Error),

    /// Options could not be loaded or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for decode operations
pub type Result<T> = std::result::Result<T, Error>;
