use str_newtype::StrNewType;

use super::all_vschar;

/// An OAuth 2.0 client identifier (borrowed).
///
/// Issued by Reddit when the application is registered, as defined in
/// [RFC 6749 Section 2.2](https://datatracker.ietf.org/doc/html/rfc6749#section-2.2).
///
/// Unlike most other OAuth 2.0 string types, a client identifier may be
/// empty (`*VSCHAR` rather than `1*VSCHAR`).
///
/// # Grammar
///
/// ```abnf
/// client_id = *VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(ClientIdBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct ClientId(str);

impl ClientId {
	/// Validates that the given string is a well-formed client identifier.
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	/// Validates that the given byte slice is a well-formed client identifier.
	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		all_vschar(bytes)
	}
}
