//! Utility functions for element factories

use crate::Error;
use bytes::Buf;

/// Checks that at least `len` bytes remain in the buffer.
///
/// Factories call this before using the (panicking) [`Buf`] getters.
#[inline]
pub fn at_least<B: Buf>(buf: &mut B, len: usize) -> Result<(), Error> {
    if buf.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    Ok(())
}
