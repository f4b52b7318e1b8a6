//! Append-only destinations for encoded arrays.
//!
//! The array writers only ever append. How much a sink may hold is up to the
//! implementation: [`Vec<u8>`] and [`BytesMut`] grow without bound, while
//! [`FixedWriter`] refuses any write that would exceed its capacity.

use crate::Error;
use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

/// Trait for append-only byte destinations.
pub trait Sink {
    /// Appends `bytes` to the sink.
    ///
    /// A sink that cannot hold `bytes` must return an error without writing any of them.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error>;

    /// Returns everything written so far.
    fn storage(&self) -> &[u8];

    /// Appends `count` zero bytes as a single write.
    ///
    /// (Provided method).
    fn write_zeros(&mut self, count: usize) -> Result<(), Error> {
        self.write(&vec![0u8; count])
    }
}

impl Sink for Vec<u8> {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    #[inline]
    fn storage(&self) -> &[u8] {
        self
    }
}

impl Sink for BytesMut {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.put_slice(bytes);
        Ok(())
    }

    #[inline]
    fn storage(&self) -> &[u8] {
        self
    }
}

/// A sink backed by a buffer of fixed capacity.
///
/// Typically sized with [`crate::array::total_size`] (or [`crate::Layout::total_size`])
/// before any element is written.
#[derive(Debug)]
pub struct FixedWriter {
    buffer: BytesMut,
    capacity: usize,
}

impl FixedWriter {
    /// Creates a writer that accepts at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the total number of bytes this writer accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of bytes that can still be written.
    pub fn available(&self) -> usize {
        self.capacity - self.buffer.len()
    }

    /// Consumes the writer, returning its storage if it has been completely filled.
    pub fn into_storage(self) -> Result<Bytes, Error> {
        if self.buffer.len() != self.capacity {
            return Err(Error::SinkUnderflow {
                written: self.buffer.len(),
                capacity: self.capacity,
            });
        }
        Ok(self.buffer.freeze())
    }
}

impl Sink for FixedWriter {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let available = self.available();
        if bytes.len() > available {
            debug!(requested = bytes.len(), available, "sink overflow");
            return Err(Error::SinkOverflow {
                requested: bytes.len(),
                available,
            });
        }
        self.buffer.put_slice(bytes);
        Ok(())
    }

    fn storage(&self) -> &[u8] {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<u8> = Vec::new();
        sink.write(&[1, 2]).unwrap();
        sink.write_zeros(3).unwrap();
        sink.write(&[]).unwrap();
        assert_eq!(sink.storage(), &[1, 2, 0, 0, 0]);
    }

    #[test]
    fn test_bytes_mut_sink() {
        let mut sink = BytesMut::new();
        sink.write(b"ab").unwrap();
        sink.write_zeros(1).unwrap();
        assert_eq!(sink.storage(), b"ab\0");
    }

    #[test]
    fn test_fixed_writer_fills_exactly() {
        let mut writer = FixedWriter::new(4);
        assert_eq!(writer.capacity(), 4);
        writer.write(&[1, 2, 3]).unwrap();
        assert_eq!(writer.available(), 1);
        writer.write(&[4]).unwrap();
        assert_eq!(writer.available(), 0);
        assert_eq!(writer.storage(), &[1, 2, 3, 4]);
        assert_eq!(writer.into_storage().unwrap(), Bytes::from_static(&[1, 2, 3, 4]));
    }

    #[test]
    fn test_fixed_writer_rejects_overflow() {
        let mut writer = FixedWriter::new(4);
        writer.write(&[1, 2, 3]).unwrap();
        assert!(matches!(
            writer.write(&[4, 5]),
            Err(Error::SinkOverflow {
                requested: 2,
                available: 1
            })
        ));

        // Rejected writes leave the storage untouched
        assert_eq!(writer.storage(), &[1, 2, 3]);
        assert!(matches!(
            writer.write_zeros(2),
            Err(Error::SinkOverflow { .. })
        ));
        writer.write_zeros(1).unwrap();
        assert_eq!(writer.storage(), &[1, 2, 3, 0]);
    }

    #[test]
    fn test_fixed_writer_underflow() {
        let mut writer = FixedWriter::new(3);
        writer.write(&[1]).unwrap();
        assert!(matches!(
            writer.into_storage(),
            Err(Error::SinkUnderflow {
                written: 1,
                capacity: 3
            })
        ));
    }
}
