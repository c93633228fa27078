use str_newtype::StrNewType;
use uuid::Uuid;

use super::all_vschar;

/// An OAuth 2.0 state parameter (borrowed).
///
/// The state parameter is an opaque value used to maintain state between an
/// authorization request and callback, primarily for CSRF protection.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-10.12>
///
/// # Grammar
///
/// ```abnf
/// state = 1*VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(serde, owned(StateBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash)))]
pub struct State(str);

impl State {
	/// Validates that the given string is a well-formed state value.
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	/// Validates that the given byte slice is a well-formed state value.
	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		!bytes.is_empty() && all_vschar(bytes)
	}
}

impl StateBuf {
	/// Generates a new random state token.
	///
	/// The token is the hyphenated form of a version 4 UUID, i.e. 36
	/// characters carrying 122 random bits.
	pub fn new_random() -> Self {
		// SAFETY: a hyphenated UUID only contains hexadecimal digits and `-`.
		unsafe { Self::new_unchecked(Uuid::new_v4().hyphenated().to_string()) }
	}
}
