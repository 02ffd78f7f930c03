/* tests/helpers/mod.rs */

use byte_reader::ByteSource;

/// In-memory source that records how many bytes were pulled from it,
/// including pulls that found it exhausted.
pub(crate) struct CountingSource {
	data: Vec<u8>,
	pos: usize,
	pub(crate) pulls: usize,
}

impl CountingSource {
	pub(crate) fn new(data: &[u8]) -> Self {
		Self {
			data: data.to_vec(),
			pos: 0,
			pulls: 0,
		}
	}

	/// Build a source from a hex fixture such as `"e58e26"`.
	pub(crate) fn from_hex(fixture: &str) -> Self {
		Self::new(&hex::decode(fixture).unwrap())
	}

	/// Bytes handed out so far.
	pub(crate) fn consumed(&self) -> usize {
		self.pos
	}
}

impl ByteSource for CountingSource {
	fn next_byte(&mut self) -> Option<u8> {
		self.pulls += 1;
		let byte = *self.data.get(self.pos)?;
		self.pos += 1;
		Some(byte)
	}
}
