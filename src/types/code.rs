use str_newtype::StrNewType;

use super::all_vschar;

/// An OAuth 2.0 authorization code (borrowed).
///
/// Authorization codes are single-use credentials returned to the redirect
/// URI and exchanged at the token endpoint, as defined in
/// [RFC 6749 Section 4.1.2](https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2).
///
/// # Grammar
///
/// ```abnf
/// code = 1*VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(serde, owned(CodeBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash)))]
pub struct Code(str);

impl Code {
	/// Validates that the given string is a well-formed authorization code.
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	/// Validates that the given byte slice is a well-formed authorization code.
	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		!bytes.is_empty() && all_vschar(bytes)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn valid_code() {
		assert!(Code::new("ABC").is_ok());
		assert!(Code::new("x9f-Qz_3#_").is_ok());
	}

	#[test]
	fn empty_code_is_invalid() {
		assert!(Code::new("").is_err());
		assert!(CodeBuf::new(String::new()).is_err());
	}

	#[test]
	fn code_rejects_control_chars() {
		assert!(Code::new("\x00").is_err());
		assert!(Code::new("abc\r\n").is_err());
	}
}
