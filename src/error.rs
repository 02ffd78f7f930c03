/* src/error.rs */

use core::str::Utf8Error;

/// Errors produced while decoding values from a byte source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// The source ran out of bytes while a value still needed more.
	#[error("unexpected end of data")]
	EndOfData,

	/// A length-bounded byte span was read but is not valid UTF-8.
	#[error("string decoding failed: {0}")]
	StringDecodingFailed(#[source] Utf8Error),
}
