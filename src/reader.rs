/* src/reader.rs */

use alloc::string::String;
use alloc::vec::Vec;

use crate::Error;
use crate::source::ByteSource;

/// Upper bound on the buffer reserved up front by [`ByteReader::read_bytes`].
///
/// Lengths frequently come straight out of the data being decoded, so the
/// buffer grows with the bytes actually delivered beyond this point.
const MAX_PREALLOC: usize = 4096;

/// Sequential little-endian decoder layered over a [`ByteSource`].
///
/// The reader keeps no position of its own: every operation pulls bytes
/// from the borrowed source strictly in order, so the source is always
/// advanced by exactly the bytes a read consumed, including on failure.
///
/// ```
/// use byte_reader::{ByteReader, SliceSource};
///
/// let data = [0x2A, 0x34, 0x12, 0x03, b'a', b'b', b'c'];
/// let mut src = SliceSource::new(&data);
/// let mut r = ByteReader::new(&mut src);
///
/// assert_eq!(r.read_u8().unwrap(), 42);
/// assert_eq!(r.read_u16().unwrap(), 0x1234);
/// assert_eq!(r.read_name().unwrap(), "abc");
/// assert!(r.read_byte().is_err());
/// ```
#[derive(Debug)]
pub struct ByteReader<'s, S: ?Sized> {
	source: &'s mut S,
}

impl<'s, S: ByteSource + ?Sized> ByteReader<'s, S> {
	/// Wrap a source for the lifetime of the reader.
	#[must_use]
	pub fn new(source: &'s mut S) -> Self {
		Self { source }
	}

	/// Borrow the underlying source.
	#[must_use]
	pub fn source(&self) -> &S {
		&*self.source
	}

	/// Mutably borrow the underlying source.
	pub fn source_mut(&mut self) -> &mut S {
		&mut *self.source
	}

	/// Read a single byte.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when the source is exhausted.
	pub fn read_byte(&mut self) -> Result<u8, Error> {
		self.source.next_byte().ok_or_else(|| {
			log::trace!("byte source exhausted");
			Error::EndOfData
		})
	}

	/// Read exactly `N` bytes in source order.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when fewer than `N` bytes remain. The
	/// bytes pulled before exhaustion are consumed.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
		let mut buf = [0u8; N];
		for slot in &mut buf {
			*slot = self.read_byte()?;
		}
		Ok(buf)
	}

	/// Read an unsigned 8-bit integer.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when the source is exhausted.
	pub fn read_u8(&mut self) -> Result<u8, Error> {
		self.read_byte()
	}

	/// Read a signed 8-bit integer.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when the source is exhausted.
	pub fn read_i8(&mut self) -> Result<i8, Error> {
		self.read_u8().map(|v| v as i8)
	}

	/// Read a little-endian unsigned 16-bit integer.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when fewer than 2 bytes remain.
	pub fn read_u16(&mut self) -> Result<u16, Error> {
		self.read_array().map(u16::from_le_bytes)
	}

	/// Read a little-endian signed 16-bit integer.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when fewer than 2 bytes remain.
	pub fn read_i16(&mut self) -> Result<i16, Error> {
		self.read_u16().map(|v| v as i16)
	}

	/// Read a little-endian unsigned 32-bit integer.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when fewer than 4 bytes remain.
	pub fn read_u32(&mut self) -> Result<u32, Error> {
		self.read_array().map(u32::from_le_bytes)
	}

	/// Read a little-endian signed 32-bit integer.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when fewer than 4 bytes remain.
	pub fn read_i32(&mut self) -> Result<i32, Error> {
		self.read_u32().map(|v| v as i32)
	}

	/// Read a little-endian unsigned 64-bit integer.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when fewer than 8 bytes remain.
	pub fn read_u64(&mut self) -> Result<u64, Error> {
		self.read_array().map(u64::from_le_bytes)
	}

	/// Read a little-endian signed 64-bit integer.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when fewer than 8 bytes remain.
	pub fn read_i64(&mut self) -> Result<i64, Error> {
		self.read_u64().map(|v| v as i64)
	}

	/// Read an IEEE-754 binary32 value from its little-endian bit pattern.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when fewer than 4 bytes remain.
	pub fn read_f32(&mut self) -> Result<f32, Error> {
		self.read_u32().map(f32::from_bits)
	}

	/// Read an IEEE-754 binary64 value from its little-endian bit pattern.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when fewer than 8 bytes remain.
	pub fn read_f64(&mut self) -> Result<f64, Error> {
		self.read_u64().map(f64::from_bits)
	}

	/// Read an unsigned LEB128 integer.
	///
	/// Encodings longer than ten bytes are consumed up to their final byte,
	/// but value bits past bit 63 are discarded.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when the source ends before a byte
	/// with a clear continuation bit.
	///
	/// ```
	/// use byte_reader::{ByteReader, SliceSource};
	///
	/// let mut src = SliceSource::new(&[0xE5, 0x8E, 0x26]);
	/// assert_eq!(ByteReader::new(&mut src).read_uleb128().unwrap(), 624_485);
	/// ```
	pub fn read_uleb128(&mut self) -> Result<u64, Error> {
		self.read_leb128().map(|leb| leb.bits)
	}

	/// Read a signed LEB128 integer.
	///
	/// When the encoding ends short of 64 bits and the sign bit (`0x40`) of
	/// the last group is set, the result is sign-extended from that group.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when the source ends before a byte
	/// with a clear continuation bit.
	///
	/// ```
	/// use byte_reader::{ByteReader, SliceSource};
	///
	/// let mut src = SliceSource::new(&[0x9B, 0xF1, 0x59]);
	/// assert_eq!(ByteReader::new(&mut src).read_sleb128().unwrap(), -624_485);
	/// ```
	pub fn read_sleb128(&mut self) -> Result<i64, Error> {
		let leb = self.read_leb128()?;
		let mut result = leb.bits as i64;
		if leb.shift < i64::BITS && leb.last & 0x40 != 0 {
			// wrapping: a shift of 63 extends with i64::MIN
			result |= (1i64 << leb.shift).wrapping_neg();
		}
		Ok(result)
	}

	fn read_leb128(&mut self) -> Result<Leb128, Error> {
		let mut bits = 0u64;
		let mut shift = 0u32;
		let mut overlong = false;
		loop {
			let byte = self.read_byte()?;
			match u64::from(byte & 0x7F).checked_shl(shift) {
				Some(group) => bits |= group,
				None => overlong = true,
			}
			shift = shift.saturating_add(7);
			if byte & 0x80 == 0 {
				if overlong {
					log::trace!("LEB128 encoding spans {shift} bits; high groups discarded");
				}
				return Ok(Leb128 {
					bits,
					shift,
					last: byte,
				});
			}
		}
	}

	/// Discard exactly `n` bytes.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when fewer than `n` bytes remain.
	pub fn skip(&mut self, n: usize) -> Result<(), Error> {
		for _ in 0..n {
			self.read_byte()?;
		}
		Ok(())
	}

	/// Read exactly `n` bytes in source order.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when fewer than `n` bytes remain; no
	/// partial buffer is returned.
	pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, Error> {
		let mut out = Vec::with_capacity(n.min(MAX_PREALLOC));
		for _ in 0..n {
			out.push(self.read_byte()?);
		}
		Ok(out)
	}

	/// Read `n` bytes and decode them as UTF-8.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when fewer than `n` bytes remain, or
	/// [`Error::StringDecodingFailed`] when the bytes are not valid UTF-8.
	pub fn read_fixed_string(&mut self, n: usize) -> Result<String, Error> {
		let bytes = self.read_bytes(n)?;
		String::from_utf8(bytes).map_err(|e| {
			log::trace!("{n}-byte string is not valid UTF-8: {e}");
			Error::StringDecodingFailed(e.utf8_error())
		})
	}

	/// Read a string prefixed by its byte length as unsigned LEB128.
	///
	/// # Errors
	///
	/// Returns [`Error::EndOfData`] when the prefix or the string body is
	/// cut short, or [`Error::StringDecodingFailed`] when the body is not
	/// valid UTF-8. A prefix too large to address in memory is reported as
	/// [`Error::EndOfData`].
	pub fn read_name(&mut self) -> Result<String, Error> {
		let len = self.read_uleb128()?;
		let len = usize::try_from(len).map_err(|_| {
			log::trace!("name length {len} exceeds addressable memory");
			Error::EndOfData
		})?;
		self.read_fixed_string(len)
	}
}

/// Raw outcome of one LEB128 consumption loop.
struct Leb128 {
	bits: u64,
	shift: u32,
	last: u8,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::SliceSource;

	fn source_over(data: &[u8]) -> SliceSource<'_> {
		SliceSource::new(data)
	}

	#[test]
	fn reads_bytes_in_order() {
		let mut src = source_over(&[12, 13, 42]);
		let mut r = ByteReader::new(&mut src);
		assert_eq!(r.read_byte(), Ok(12));
		assert_eq!(r.read_byte(), Ok(13));
		assert_eq!(r.read_byte(), Ok(42));
		assert_eq!(r.read_byte(), Err(Error::EndOfData));
	}

	#[test]
	fn read_array_groups() {
		let mut src = source_over(&[12, 13, 42, 65, 1, 2, 3, 4]);
		let mut r = ByteReader::new(&mut src);
		assert_eq!(r.read_array::<2>(), Ok([12, 13]));
		assert_eq!(r.read_array::<4>(), Ok([42, 65, 1, 2]));
		assert_eq!(r.read_array::<0>(), Ok([]));
		assert_eq!(r.read_array::<4>(), Err(Error::EndOfData));
	}

	#[test]
	fn uleb128_single_byte() {
		let mut src = source_over(&[0x7F]);
		assert_eq!(ByteReader::new(&mut src).read_uleb128(), Ok(127));
	}

	#[test]
	fn sleb128_single_byte() {
		let mut src = source_over(&[0x3F, 0x41, 0x7F, 0x40]);
		let mut r = ByteReader::new(&mut src);
		assert_eq!(r.read_sleb128(), Ok(63));
		assert_eq!(r.read_sleb128(), Ok(-63));
		assert_eq!(r.read_sleb128(), Ok(-1));
		assert_eq!(r.read_sleb128(), Ok(-64));
	}

	#[test]
	fn sleb128_sign_extends_from_bit_63() {
		// nine groups; the last carries the sign at bit 62 of the result
		let data = [0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x40];
		let mut src = source_over(&data);
		assert_eq!(ByteReader::new(&mut src).read_sleb128(), Ok(-(1i64 << 62)));
	}

	#[test]
	fn sleb128_extremes() {
		let min = [0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x7F];
		let mut src = source_over(&min);
		assert_eq!(ByteReader::new(&mut src).read_sleb128(), Ok(i64::MIN));

		let max = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];
		let mut src = source_over(&max);
		assert_eq!(ByteReader::new(&mut src).read_sleb128(), Ok(i64::MAX));
	}

	#[test]
	fn invalid_utf8_keeps_error_detail() {
		let mut src = source_over(&[0x66, 0xFF]);
		let err = ByteReader::new(&mut src).read_fixed_string(2).unwrap_err();
		let Error::StringDecodingFailed(detail) = err else {
			panic!("unexpected error {err:?}");
		};
		assert_eq!(detail.valid_up_to(), 1);
	}
}
