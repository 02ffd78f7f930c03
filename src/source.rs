/* src/source.rs */

use alloc::boxed::Box;

/// A provider of bytes, consumed one at a time in order.
///
/// This is the only capability [`ByteReader`](crate::ByteReader) needs:
/// hand out the next unread byte, or `None` once nothing is left. The
/// source owns its position; the reader never seeks or peeks.
///
/// ```
/// use byte_reader::ByteSource;
///
/// struct Countdown(u8);
///
/// impl ByteSource for Countdown {
/// 	fn next_byte(&mut self) -> Option<u8> {
/// 		self.0 = self.0.checked_sub(1)?;
/// 		Some(self.0)
/// 	}
/// }
///
/// let mut src = Countdown(2);
/// assert_eq!(src.next_byte(), Some(1));
/// assert_eq!(src.next_byte(), Some(0));
/// assert_eq!(src.next_byte(), None);
/// ```
pub trait ByteSource {
	/// Produce the next unread byte, or `None` when the source is exhausted.
	fn next_byte(&mut self) -> Option<u8>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
	#[inline]
	fn next_byte(&mut self) -> Option<u8> {
		(**self).next_byte()
	}
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
	#[inline]
	fn next_byte(&mut self) -> Option<u8> {
		(**self).next_byte()
	}
}

/// Memory-backed source over a borrowed byte slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceSource<'a> {
	data: &'a [u8],
	pos: usize,
}

impl<'a> SliceSource<'a> {
	/// Create a source positioned at the start of `data`.
	#[must_use]
	pub fn new(data: &'a [u8]) -> Self {
		Self { data, pos: 0 }
	}

	/// Number of bytes handed out so far.
	#[must_use]
	pub fn position(&self) -> usize {
		self.pos
	}

	/// Number of bytes not yet handed out.
	#[must_use]
	pub fn remaining(&self) -> usize {
		self.data.len() - self.pos
	}

	/// Whether every byte has been handed out.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	/// The unread tail of the underlying slice.
	#[must_use]
	pub fn as_slice(&self) -> &'a [u8] {
		&self.data[self.pos..]
	}
}

impl ByteSource for SliceSource<'_> {
	#[inline]
	fn next_byte(&mut self) -> Option<u8> {
		let byte = *self.data.get(self.pos)?;
		self.pos += 1;
		Some(byte)
	}
}

/// Source pulling bytes from any iterator over `u8`.
///
/// ```
/// use byte_reader::{ByteReader, IterSource};
///
/// let mut src = IterSource::new([0x34u8, 0x12].into_iter());
/// let mut r = ByteReader::new(&mut src);
/// assert_eq!(r.read_u16().unwrap(), 0x1234);
/// ```
#[derive(Debug, Clone)]
pub struct IterSource<I> {
	iter: I,
}

impl<I: Iterator<Item = u8>> IterSource<I> {
	/// Wrap an iterator.
	#[must_use]
	pub fn new(iter: I) -> Self {
		Self { iter }
	}

	/// Recover the wrapped iterator.
	pub fn into_inner(self) -> I {
		self.iter
	}
}

impl<I: Iterator<Item = u8>> ByteSource for IterSource<I> {
	#[inline]
	fn next_byte(&mut self) -> Option<u8> {
		self.iter.next()
	}
}

#[cfg(feature = "std")]
pub use self::io::IoSource;

#[cfg(feature = "std")]
mod io {
	use std::io::{ErrorKind, Read};

	use super::ByteSource;

	/// Source backed by a [`std::io::Read`] implementation.
	///
	/// Bytes are requested one at a time; wrap files and sockets in a
	/// [`std::io::BufReader`] first. End of stream and
	/// [`ErrorKind::UnexpectedEof`] count as exhaustion, interrupted reads
	/// are retried. Any other I/O error ends the stream and is kept so the
	/// caller can tell it apart from a clean end via [`IoSource::take_error`].
	#[derive(Debug)]
	pub struct IoSource<R> {
		inner: R,
		error: Option<std::io::Error>,
	}

	impl<R: Read> IoSource<R> {
		/// Wrap a reader.
		#[must_use]
		pub fn new(inner: R) -> Self {
			Self { inner, error: None }
		}

		/// Borrow the wrapped reader.
		pub fn get_ref(&self) -> &R {
			&self.inner
		}

		/// Mutably borrow the wrapped reader.
		pub fn get_mut(&mut self) -> &mut R {
			&mut self.inner
		}

		/// Recover the wrapped reader, dropping any retained error.
		pub fn into_inner(self) -> R {
			self.inner
		}

		/// The I/O error that ended the stream, if any.
		#[must_use]
		pub fn error(&self) -> Option<&std::io::Error> {
			self.error.as_ref()
		}

		/// Take the retained I/O error, re-enabling reads from the inner reader.
		pub fn take_error(&mut self) -> Option<std::io::Error> {
			self.error.take()
		}
	}

	impl<R: Read> ByteSource for IoSource<R> {
		fn next_byte(&mut self) -> Option<u8> {
			if self.error.is_some() {
				return None;
			}
			let mut buf = [0u8; 1];
			loop {
				match self.inner.read(&mut buf) {
					Ok(0) => return None,
					Ok(_) => return Some(buf[0]),
					Err(e) if e.kind() == ErrorKind::Interrupted => {}
					Err(e) if e.kind() == ErrorKind::UnexpectedEof => return None,
					Err(e) => {
						log::debug!("I/O source failed, treating as end of data: {e}");
						self.error = Some(e);
						return None;
					}
				}
			}
		}
	}
}
