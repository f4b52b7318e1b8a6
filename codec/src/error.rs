//! Error types for layout operations

use thiserror::Error;

/// Error type for layout operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("element size has invalid size: {0}")]
    InvalidElementSize(u32),
    #[error("elements in array are not sorted")]
    UnsortedRead,
    #[error("array passed to write array is not sorted")]
    UnsortedWrite,
    #[error("size cannot be greater than the remaining bytes: {requested} > {remaining}")]
    OutOfBounds { requested: usize, remaining: usize },
    #[error("unexpected buffer length: padding {padding} > remaining {remaining}")]
    UnexpectedBufferLength { padding: usize, remaining: usize },
    #[error("sink overflow: {requested} > {available}")]
    SinkOverflow { requested: usize, available: usize },
    #[error("sink underflow: {written} < {capacity}")]
    SinkUnderflow { written: usize, capacity: usize },
    #[error("invalid length: {0}")]
    InvalidLength(usize),
    #[error("unexpected end of buffer")]
    EndOfBuffer,
}
