//! Lay out arrays of variably-sized elements.
//!
//! # Overview
//!
//! The building block beneath schema-driven binary messages: every message is a
//! sequence of self-describing elements, and this crate decides where each one
//! sits on the wire. It can:
//! - Compute the encoded size of an array, packed or aligned
//! - Decode an array from a bounded [`BufferView`], optionally requiring strictly increasing keys
//! - Encode an array to any [`Sink`], inserting zero padding where alignment requires it
//!
//! # Elements
//!
//! Any type implementing [`Element`] can be laid out. An element reports its encoded
//! size and produces its encoding on demand. Decoding is driven by a factory closure
//! that reads exactly one element from a [`BufferView`].
//!
//! # Example
//!
//! ```
//! use bytes::{Buf, Bytes, BufMut};
//! use packbuf_codec::{array, util::at_least, BufferView, Element, Error, FixedWriter};
//!
//! // An account entry: 8 byte id followed by a 4 byte balance.
//! #[derive(Debug, PartialEq)]
//! struct Entry {
//!     id: u64,
//!     balance: u32,
//! }
//!
//! impl Element for Entry {
//!     fn size(&self) -> u32 {
//!         12
//!     }
//!
//!     fn encode(&self) -> Bytes {
//!         let mut buf = Vec::with_capacity(12);
//!         buf.put_u64_le(self.id);
//!         buf.put_u32_le(self.balance);
//!         buf.into()
//!     }
//! }
//!
//! fn read_entry(view: &mut BufferView) -> Result<Entry, Error> {
//!     at_least(view, 12)?;
//!     Ok(Entry {
//!         id: view.get_u64_le(),
//!         balance: view.get_u32_le(),
//!     })
//! }
//!
//! let entries = vec![Entry { id: 1, balance: 50 }, Entry { id: 7, balance: 10 }];
//!
//! // Entries must be written (and read) in strictly increasing id order.
//! let mut writer = FixedWriter::new(array::total_size(&entries, 0, false));
//! array::write_array_sorted(&mut writer, &entries, |e: &Entry| [e.id]).unwrap();
//!
//! let mut view = BufferView::wrap(writer.into_storage().unwrap());
//! let decoded = array::read_array_sorted(&mut view, read_entry, |e: &Entry| [e.id]).unwrap();
//! assert_eq!(decoded, entries);
//! ```

pub mod array;
pub mod config;
pub mod element;
pub mod error;
pub mod sink;
pub mod util;
pub mod view;

// Re-export main types and traits
pub use config::Layout;
pub use element::Element;
pub use error::Error;
pub use sink::{FixedWriter, Sink};
pub use view::BufferView;
