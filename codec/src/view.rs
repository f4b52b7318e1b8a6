//! A bounded, position-tracking read window over shared bytes.
//!
//! # Ownership
//!
//! A [`BufferView`] holds a cheaply cloned handle to the underlying [`Bytes`] and
//! exclusively owns its own `position` and `limit`. Windows created with
//! [`BufferView::window`] or [`BufferView::narrow`] share the same storage
//! (no copy) but move independently of the view they were created from.
//!
//! # Invariants
//!
//! `position <= limit <= source.len()` at all times. Every operation that moves
//! `position` or `limit` can only narrow the visible range, never widen it.
//!
//! `position` is an absolute offset into the source, so a window over
//! `source[15..67]` starts at position 15.

use crate::Error;
use bytes::{Buf, Bytes};

/// A bounded cursor over a byte source.
#[derive(Clone, Debug)]
pub struct BufferView {
    source: Bytes,
    position: usize,
    limit: usize,
}

impl BufferView {
    /// Creates a view over all of `source`.
    pub fn wrap(source: impl Into<Bytes>) -> Self {
        let source = source.into();
        let limit = source.len();
        Self {
            source,
            position: 0,
            limit,
        }
    }

    /// Creates a new view over the remaining bytes of `other`.
    ///
    /// `other` is not modified.
    pub fn narrow(other: &BufferView) -> Self {
        Self {
            source: other.source.clone(),
            position: other.position,
            limit: other.limit,
        }
    }

    /// Returns the absolute offset of the next unread byte.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the absolute offset one past the last visible byte.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of visible bytes that have not been consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Returns true if no visible bytes remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Moves the position forward by `size` bytes.
    pub fn advance(&mut self, size: usize) -> Result<(), Error> {
        self.check(size)?;
        self.position += size;
        Ok(())
    }

    /// Returns an independent view over the next `size` bytes.
    ///
    /// The position of this view is unchanged.
    pub fn window(&self, size: usize) -> Result<BufferView, Error> {
        self.check(size)?;
        Ok(Self {
            source: self.source.clone(),
            position: self.position,
            limit: self.position + size,
        })
    }

    /// Narrows this view so that exactly `size` bytes remain.
    pub fn shrink(&mut self, size: usize) -> Result<(), Error> {
        self.check(size)?;
        self.limit = self.position + size;
        Ok(())
    }

    /// Returns the next `size` bytes without consuming them.
    pub fn peek(&self, size: usize) -> Result<Bytes, Error> {
        self.check(size)?;
        Ok(self.source.slice(self.position..self.position + size))
    }

    /// Returns the next `size` bytes and consumes them.
    pub fn read_bytes(&mut self, size: usize) -> Result<Bytes, Error> {
        let bytes = self.peek(size)?;
        self.position += size;
        Ok(bytes)
    }

    /// Returns all remaining bytes without consuming them.
    pub fn peek_remaining(&self) -> Bytes {
        self.source.slice(self.position..self.limit)
    }

    fn check(&self, size: usize) -> Result<(), Error> {
        let remaining = self.remaining();
        if size > remaining {
            return Err(Error::OutOfBounds {
                requested: size,
                remaining,
            });
        }
        Ok(())
    }
}

impl Buf for BufferView {
    #[inline]
    fn remaining(&self) -> usize {
        BufferView::remaining(self)
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        &self.source[self.position..self.limit]
    }

    fn advance(&mut self, cnt: usize) {
        if let Err(err) = BufferView::advance(self, cnt) {
            panic!("cannot advance past the end of the view: {err}");
        }
    }
}
