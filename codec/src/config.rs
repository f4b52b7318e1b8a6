//! Configuration of aligned array layouts.

use crate::{array, BufferView, Element, Error, Sink};

/// Configuration for laying out variably-sized elements.
///
/// Bundles the alignment and the last-element padding rule so that the size
/// computation, the reader, and the writer of an array always agree.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use packbuf_codec::{BufferView, FixedWriter, Layout, Sink};
///
/// let layout = Layout::aligned(8).skip_last_element_padding();
/// let elements = vec![Bytes::from_static(b"abc"), Bytes::from_static(b"defgh")];
///
/// // 3 bytes padded to 8, then 5 unpadded bytes
/// assert_eq!(layout.total_size(&elements), 13);
///
/// let mut writer = FixedWriter::new(layout.total_size(&elements));
/// layout.write(&mut writer, &elements).unwrap();
/// assert_eq!(writer.storage(), b"abc\0\0\0\0\0defgh");
///
/// // Raw bytes carry no length, so this factory knows each element's size
/// let mut sizes = [3usize, 5].into_iter();
/// let mut view = BufferView::wrap(writer.into_storage().unwrap());
/// let decoded = layout
///     .read(&mut view, |view| view.read_bytes(sizes.next().unwrap()))
///     .unwrap();
/// assert_eq!(decoded, elements);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Layout {
    /// Alignment of each element, or zero if elements are packed.
    alignment: usize,

    /// Whether the last element is left unpadded.
    skip_last_element_padding: bool,
}

impl Layout {
    /// Creates a layout with no padding between elements.
    pub const fn packed() -> Self {
        Self {
            alignment: 0,
            skip_last_element_padding: false,
        }
    }

    /// Creates a layout that pads every element to a multiple of `alignment`.
    ///
    /// An `alignment` of zero is equivalent to [`Layout::packed`].
    pub const fn aligned(alignment: usize) -> Self {
        Self {
            alignment,
            skip_last_element_padding: false,
        }
    }

    /// Leaves the last element of the array unpadded.
    pub const fn skip_last_element_padding(mut self) -> Self {
        self.skip_last_element_padding = true;
        self
    }

    /// Returns the alignment, or zero if elements are packed.
    pub const fn alignment(&self) -> usize {
        self.alignment
    }

    /// Returns true if the last element is left unpadded.
    pub const fn skips_last_element_padding(&self) -> bool {
        self.skip_last_element_padding
    }

    /// Returns the number of zero bytes that follow an element of `size` bytes.
    pub fn padding(&self, size: usize, is_last: bool) -> usize {
        if is_last && self.skip_last_element_padding {
            return 0;
        }
        array::padding(size, self.alignment)
    }

    /// Returns the encoded length of `elements` under this layout.
    pub fn total_size<T: Element>(&self, elements: &[T]) -> usize {
        array::total_size(elements, self.alignment, self.skip_last_element_padding)
    }

    /// Reads elements under this layout until `view` is exhausted.
    pub fn read<T, F>(&self, view: &mut BufferView, factory: F) -> Result<Vec<T>, Error>
    where
        T: Element,
        F: FnMut(&mut BufferView) -> Result<T, Error>,
    {
        array::read_variable_size_elements(
            view,
            factory,
            self.alignment,
            self.skip_last_element_padding,
        )
    }

    /// Writes `elements` under this layout.
    pub fn write<T: Element>(&self, sink: &mut impl Sink, elements: &[T]) -> Result<(), Error> {
        array::write_variable_size_elements(
            sink,
            elements,
            self.alignment,
            self.skip_last_element_padding,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use test_case::test_case;

    fn chunks(sizes: &[usize]) -> Vec<Bytes> {
        sizes
            .iter()
            .map(|&size| Bytes::from(vec![0xEE; size]))
            .collect()
    }

    #[test]
    fn test_constructors() {
        assert_eq!(Layout::default(), Layout::packed());
        assert_eq!(Layout::packed().alignment(), 0);
        assert!(!Layout::packed().skips_last_element_padding());

        let layout = Layout::aligned(4);
        assert_eq!(layout.alignment(), 4);
        assert!(!layout.skips_last_element_padding());

        let layout = layout.skip_last_element_padding();
        assert_eq!(layout.alignment(), 4);
        assert!(layout.skips_last_element_padding());
        assert_eq!(Layout::aligned(0), Layout::packed());
    }

    #[test_case(Layout::packed(), 5, false, 0; "packed")]
    #[test_case(Layout::aligned(4), 5, false, 3; "aligned")]
    #[test_case(Layout::aligned(4), 8, false, 0; "already aligned")]
    #[test_case(Layout::aligned(4), 5, true, 3; "aligned last")]
    #[test_case(Layout::aligned(4).skip_last_element_padding(), 5, false, 3; "skip not last")]
    #[test_case(Layout::aligned(4).skip_last_element_padding(), 5, true, 0; "skip last")]
    fn test_padding(layout: Layout, size: usize, is_last: bool, expected: usize) {
        assert_eq!(layout.padding(size, is_last), expected);
    }

    #[test]
    fn test_total_size_matches_array() {
        let elements = chunks(&[13, 21, 34]);
        assert_eq!(Layout::packed().total_size(&elements), 68);
        assert_eq!(Layout::aligned(9).total_size(&elements), 81);
        assert_eq!(
            Layout::aligned(9)
                .skip_last_element_padding()
                .total_size(&elements),
            79
        );
    }

    #[test]
    fn test_total_size_matches_padding() {
        let elements = chunks(&[1, 4, 7, 10, 13]);
        for layout in [
            Layout::packed(),
            Layout::aligned(4),
            Layout::aligned(4).skip_last_element_padding(),
        ] {
            let last = elements.len() - 1;
            let expected: usize = elements
                .iter()
                .enumerate()
                .map(|(i, e)| e.len() + layout.padding(e.len(), i == last))
                .sum();
            assert_eq!(layout.total_size(&elements), expected);
        }
    }

    #[test]
    fn test_round_trip() {
        let elements = chunks(&[3, 8, 1, 6]);
        for layout in [
            Layout::packed(),
            Layout::aligned(8),
            Layout::aligned(8).skip_last_element_padding(),
        ] {
            let mut sink: Vec<u8> = Vec::new();
            layout.write(&mut sink, &elements).unwrap();
            assert_eq!(sink.len(), layout.total_size(&elements));

            let mut sizes = elements.iter().map(|e| e.len());
            let mut view = BufferView::wrap(sink);
            let decoded = layout
                .read(&mut view, |view| view.read_bytes(sizes.next().unwrap()))
                .unwrap();
            assert_eq!(decoded, elements);
        }
    }
}
