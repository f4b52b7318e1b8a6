//! The element capability shared by every array layout.

use crate::{Error, Sink};
use bytes::Bytes;

/// Trait for values that can be laid out inside an array.
///
/// An element knows how many bytes its encoding occupies and can produce that
/// encoding on demand. Alignment padding is always derived from [`Element::size`],
/// never from the length of [`Element::encode`].
pub trait Element {
    /// Returns the encoded length of this element.
    ///
    /// Must be non-zero. The array functions reject zero-sized elements with
    /// [`Error::InvalidElementSize`].
    fn size(&self) -> u32;

    /// Returns the encoded bytes of this element.
    fn encode(&self) -> Bytes;

    /// Appends the encoding of this element to `sink`.
    ///
    /// (Provided method).
    fn write_to(&self, sink: &mut impl Sink) -> Result<(), Error> {
        sink.write(&self.encode())
    }
}

impl Element for Bytes {
    #[inline]
    fn size(&self) -> u32 {
        u32::try_from(self.len()).expect("Bytes length exceeds u32")
    }

    #[inline]
    fn encode(&self) -> Bytes {
        self.clone()
    }
}

impl Element for Vec<u8> {
    #[inline]
    fn size(&self) -> u32 {
        u32::try_from(self.len()).expect("Vec length exceeds u32")
    }

    #[inline]
    fn encode(&self) -> Bytes {
        Bytes::copy_from_slice(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_element() {
        let element = Bytes::from_static(&[1, 2, 3]);
        assert_eq!(element.size(), 3);
        assert_eq!(element.encode(), Bytes::from_static(&[1, 2, 3]));

        let empty = Bytes::new();
        assert_eq!(empty.size(), 0);
    }

    #[test]
    fn test_vec_element() {
        let element = vec![9u8; 5];
        assert_eq!(element.size(), 5);
        assert_eq!(element.encode().as_ref(), &[9u8; 5]);
    }

    #[test]
    fn test_write_to() {
        let mut sink: Vec<u8> = Vec::new();
        Bytes::from_static(b"abc").write_to(&mut sink).unwrap();
        vec![0xffu8].write_to(&mut sink).unwrap();
        assert_eq!(sink.storage(), b"abc\xff");
    }
}
