//! Reading and writing arrays of variably-sized elements.
//!
//! # Layouts
//!
//! Elements are either packed back to back ([`read_array`], [`write_array`] and
//! their `_count` variants) or each padded with zero bytes up to a multiple of an
//! alignment ([`read_variable_size_elements`], [`write_variable_size_elements`]).
//! With `skip_last_element_padding`, the final element of an aligned array is
//! left unpadded. [`total_size`] computes the encoded length of either layout.
//!
//! # Ordering
//!
//! The `_sorted` variants take a key extractor and require every element's key
//! to compare strictly less than the next element's key under [`deep_compare`].
//! Equal or reversed adjacent keys are an error.
//!
//! # Factories
//!
//! Readers decode one element at a time with a caller-supplied factory. The
//! factory must consume exactly [`Element::size`] bytes from the view it is given.
//! Readers skip padding themselves; factories never see it.
//!
//! # Example
//!
//! ```
//! use bytes::{Buf, Bytes};
//! use packbuf_codec::{array, util::at_least, BufferView, Element, Error};
//!
//! // A length-prefixed blob: one byte of length followed by that many bytes.
//! #[derive(Debug, PartialEq)]
//! struct Blob(Bytes);
//!
//! impl Element for Blob {
//!     fn size(&self) -> u32 {
//!         1 + self.0.len() as u32
//!     }
//!
//!     fn encode(&self) -> Bytes {
//!         let mut encoded = vec![self.0.len() as u8];
//!         encoded.extend_from_slice(&self.0);
//!         encoded.into()
//!     }
//! }
//!
//! fn read_blob(view: &mut BufferView) -> Result<Blob, Error> {
//!     at_least(view, 1)?;
//!     let len = view.get_u8() as usize;
//!     Ok(Blob(view.read_bytes(len)?))
//! }
//!
//! let blobs = vec![Blob(Bytes::from_static(b"abc")), Blob(Bytes::from_static(b"de"))];
//!
//! // Pad every blob except the last to a multiple of 4 bytes.
//! let mut sink: Vec<u8> = Vec::new();
//! array::write_variable_size_elements(&mut sink, &blobs, 4, true).unwrap();
//! assert_eq!(sink, b"\x03abc\x02de");
//! assert_eq!(array::total_size(&blobs, 4, true), sink.len());
//!
//! let mut view = BufferView::wrap(sink);
//! let decoded = array::read_variable_size_elements(&mut view, read_blob, 4, true).unwrap();
//! assert_eq!(decoded, blobs);
//! ```

use crate::{BufferView, Element, Error, Sink};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Compares two ordering keys.
///
/// Keys of different lengths are ordered by length alone (the longer key is
/// greater) without inspecting their values. Keys of the same length are
/// compared lexicographically.
pub fn deep_compare<S: Ord>(lhs: &[S], rhs: &[S]) -> Ordering {
    if lhs.len() != rhs.len() {
        return lhs.len().cmp(&rhs.len());
    }
    for (l, r) in lhs.iter().zip(rhs) {
        let ordering = l.cmp(r);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Rounds `size` up to the nearest multiple of `alignment`.
///
/// # Panics
///
/// Panics if `alignment` is zero.
#[inline]
pub fn align_up(size: usize, alignment: usize) -> usize {
    assert!(alignment > 0, "alignment must be positive");
    size.div_ceil(alignment) * alignment
}

/// Returns the number of zero bytes that follow an element of `size` bytes.
///
/// An `alignment` of zero means the elements are packed.
#[inline]
pub(crate) fn padding(size: usize, alignment: usize) -> usize {
    if alignment == 0 {
        return 0;
    }
    align_up(size, alignment) - size
}

/// Returns the encoded length of `elements` laid out with `alignment`.
///
/// With an `alignment` of zero the sizes are summed without padding. Otherwise
/// every element is rounded up to `alignment`, except the last one when
/// `skip_last_element_padding` is set.
pub fn total_size<T: Element>(
    elements: &[T],
    alignment: usize,
    skip_last_element_padding: bool,
) -> usize {
    let Some((last, init)) = elements.split_last() else {
        return 0;
    };
    if alignment == 0 {
        return elements.iter().map(|e| e.size() as usize).sum();
    }
    if !skip_last_element_padding {
        return elements
            .iter()
            .map(|e| align_up(e.size() as usize, alignment))
            .sum();
    }
    init.iter()
        .map(|e| align_up(e.size() as usize, alignment))
        .sum::<usize>()
        + last.size() as usize
}

/// Orders two adjacent elements.
type Comparator<'a, T> = &'a dyn Fn(&T, &T) -> Ordering;

/// Builds a comparator that orders elements by the key returned by `key`.
fn by_key<T, K, S>(key: impl Fn(&T) -> K) -> impl Fn(&T, &T) -> Ordering
where
    K: AsRef<[S]>,
    S: Ord,
{
    move |lhs: &T, rhs: &T| deep_compare(key(lhs).as_ref(), key(rhs).as_ref())
}

fn check_size<T: Element>(index: usize, element: &T) -> Result<usize, Error> {
    let size = element.size();
    if size == 0 {
        debug!(index, size, "element size has invalid size");
        return Err(Error::InvalidElementSize(size));
    }
    Ok(size as usize)
}

fn read_array_impl<T, F>(
    view: &mut BufferView,
    mut factory: F,
    compare: Option<Comparator<'_, T>>,
    should_continue: impl Fn(usize, &BufferView) -> bool,
) -> Result<Vec<T>, Error>
where
    T: Element,
    F: FnMut(&mut BufferView) -> Result<T, Error>,
{
    let mut elements: Vec<T> = Vec::new();
    while should_continue(elements.len(), view) {
        let element = factory(view)?;
        check_size(elements.len(), &element)?;
        if let (Some(compare), Some(previous)) = (compare, elements.last()) {
            if compare(previous, &element) != Ordering::Less {
                debug!(index = elements.len(), "elements in array are not sorted");
                return Err(Error::UnsortedRead);
            }
        }
        elements.push(element);
    }
    trace!(
        count = elements.len(),
        remaining = view.remaining(),
        "read array"
    );
    Ok(elements)
}

/// Reads packed elements until `view` is exhausted.
///
/// `view` must end exactly where the array ends.
pub fn read_array<T, F>(view: &mut BufferView, factory: F) -> Result<Vec<T>, Error>
where
    T: Element,
    F: FnMut(&mut BufferView) -> Result<T, Error>,
{
    read_array_impl(view, factory, None, |_, view| !view.is_empty())
}

/// Reads packed elements until `view` is exhausted, requiring their keys to be
/// strictly increasing.
pub fn read_array_sorted<T, F, K, S>(
    view: &mut BufferView,
    factory: F,
    key: impl Fn(&T) -> K,
) -> Result<Vec<T>, Error>
where
    T: Element,
    F: FnMut(&mut BufferView) -> Result<T, Error>,
    K: AsRef<[S]>,
    S: Ord,
{
    let compare = by_key(key);
    read_array_impl(view, factory, Some(&compare), |_, view| !view.is_empty())
}

/// Reads exactly `count` packed elements.
///
/// Bytes left in `view` afterwards are not inspected. If `view` runs out first,
/// the factory's error is returned.
pub fn read_array_count<T, F>(
    view: &mut BufferView,
    factory: F,
    count: usize,
) -> Result<Vec<T>, Error>
where
    T: Element,
    F: FnMut(&mut BufferView) -> Result<T, Error>,
{
    read_array_impl(view, factory, None, |index, _| index < count)
}

/// Reads exactly `count` packed elements, requiring their keys to be strictly
/// increasing.
pub fn read_array_count_sorted<T, F, K, S>(
    view: &mut BufferView,
    factory: F,
    count: usize,
    key: impl Fn(&T) -> K,
) -> Result<Vec<T>, Error>
where
    T: Element,
    F: FnMut(&mut BufferView) -> Result<T, Error>,
    K: AsRef<[S]>,
    S: Ord,
{
    let compare = by_key(key);
    read_array_impl(view, factory, Some(&compare), |index, _| index < count)
}

/// Reads aligned elements until `view` is exhausted.
///
/// After each element, the padding up to the next multiple of `alignment` is
/// skipped. When `skip_last_element_padding` is set, an element that reaches the
/// end of `view` is not followed by padding.
pub fn read_variable_size_elements<T, F>(
    view: &mut BufferView,
    mut factory: F,
    alignment: usize,
    skip_last_element_padding: bool,
) -> Result<Vec<T>, Error>
where
    T: Element,
    F: FnMut(&mut BufferView) -> Result<T, Error>,
{
    let mut elements = Vec::new();
    while !view.is_empty() {
        let available = view.remaining();
        let element = factory(view)?;
        let size = check_size(elements.len(), &element)?;

        let padding = if skip_last_element_padding && size >= available {
            0
        } else {
            padding(size, alignment)
        };
        let remaining = view.remaining();
        if padding > remaining {
            debug!(
                index = elements.len(),
                size, padding, remaining, "unexpected buffer length"
            );
            return Err(Error::UnexpectedBufferLength { padding, remaining });
        }
        view.advance(padding)?;
        elements.push(element);
    }
    trace!(count = elements.len(), alignment, "read variable size elements");
    Ok(elements)
}

/// Returns the first `count` elements after checking that each can be written.
fn prepare_write<'a, T: Element>(
    elements: &'a [T],
    count: usize,
    compare: Option<Comparator<'_, T>>,
) -> Result<&'a [T], Error> {
    let Some(elements) = elements.get(..count) else {
        debug!(count, len = elements.len(), "write count exceeds elements");
        return Err(Error::InvalidLength(count));
    };
    for (index, element) in elements.iter().enumerate() {
        check_size(index, element)?;
    }
    if let Some(compare) = compare {
        if let Some(index) = elements
            .windows(2)
            .position(|pair| compare(&pair[0], &pair[1]) != Ordering::Less)
        {
            debug!(index = index + 1, "array passed to write array is not sorted");
            return Err(Error::UnsortedWrite);
        }
    }
    Ok(elements)
}

fn write_array_impl<T: Element>(
    sink: &mut impl Sink,
    elements: &[T],
    count: usize,
    compare: Option<Comparator<'_, T>>,
) -> Result<(), Error> {
    let elements = prepare_write(elements, count, compare)?;
    for element in elements {
        element.write_to(sink)?;
    }
    trace!(count, "wrote array");
    Ok(())
}

/// Writes all `elements` back to back.
pub fn write_array<T: Element>(sink: &mut impl Sink, elements: &[T]) -> Result<(), Error> {
    write_array_impl(sink, elements, elements.len(), None)
}

/// Writes all `elements` back to back, requiring their keys to be strictly
/// increasing.
///
/// Nothing is written if the check fails.
pub fn write_array_sorted<T, K, S>(
    sink: &mut impl Sink,
    elements: &[T],
    key: impl Fn(&T) -> K,
) -> Result<(), Error>
where
    T: Element,
    K: AsRef<[S]>,
    S: Ord,
{
    let compare = by_key(key);
    write_array_impl(sink, elements, elements.len(), Some(&compare))
}

/// Writes the first `count` elements back to back.
pub fn write_array_count<T: Element>(
    sink: &mut impl Sink,
    elements: &[T],
    count: usize,
) -> Result<(), Error> {
    write_array_impl(sink, elements, count, None)
}

/// Writes the first `count` elements back to back, requiring their keys to be
/// strictly increasing.
///
/// Only the first `count` elements are checked.
pub fn write_array_count_sorted<T, K, S>(
    sink: &mut impl Sink,
    elements: &[T],
    count: usize,
    key: impl Fn(&T) -> K,
) -> Result<(), Error>
where
    T: Element,
    K: AsRef<[S]>,
    S: Ord,
{
    let compare = by_key(key);
    write_array_impl(sink, elements, count, Some(&compare))
}

/// Writes all `elements`, each followed by zero padding up to a multiple of
/// `alignment`.
///
/// The last element is not padded when `skip_last_element_padding` is set.
pub fn write_variable_size_elements<T: Element>(
    sink: &mut impl Sink,
    elements: &[T],
    alignment: usize,
    skip_last_element_padding: bool,
) -> Result<(), Error> {
    let elements = prepare_write(elements, elements.len(), None)?;
    let last = elements.len().saturating_sub(1);
    for (index, element) in elements.iter().enumerate() {
        element.write_to(sink)?;
        if skip_last_element_padding && index == last {
            continue;
        }
        let padding = padding(element.size() as usize, alignment);
        if padding != 0 {
            sink.write_zeros(padding)?;
        }
    }
    trace!(count = elements.len(), alignment, "wrote variable size elements");
    Ok(())
}
