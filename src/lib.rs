/* src/lib.rs */

//! Sequential binary reader for little-endian formats.
//!
//! A [`ByteReader`] borrows any [`ByteSource`] (anything that can hand
//! out its next byte) and decodes typed values from it in order:
//!
//! - fixed-width integers, signed and unsigned, 8 to 64 bits, little-endian
//! - IEEE-754 `f32` / `f64`
//! - unsigned and signed LEB128
//! - raw byte spans, fixed-length UTF-8 strings and LEB128
//!   length-prefixed names
//!
//! Every read either returns a complete value or fails with
//! [`Error::EndOfData`] / [`Error::StringDecodingFailed`]. The source
//! keeps the position, so bytes consumed before a failure stay consumed.
//!
//! ```
//! use byte_reader::{ByteReader, Error, SliceSource};
//!
//! let mut src = SliceSource::new(&[0xF4, 0xE5, 0x8E, 0x26, 0x01]);
//! let mut r = ByteReader::new(&mut src);
//! assert_eq!(r.read_i8().unwrap(), -12);
//! assert_eq!(r.read_uleb128().unwrap(), 624_485);
//! assert_eq!(r.read_u16(), Err(Error::EndOfData));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod error;
mod reader;
mod source;

pub use crate::error::Error;
pub use crate::reader::ByteReader;
#[cfg(feature = "std")]
pub use crate::source::IoSource;
pub use crate::source::{ByteSource, IterSource, SliceSource};
