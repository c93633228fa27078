use str_newtype::StrNewType;

use super::all_vschar;

/// Access Token.
///
/// Bearer credential returned by the token endpoint.
///
/// # Grammar
///
/// ```abnf
/// access-token = 1*VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(AccessTokenBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct AccessToken(str);

impl AccessToken {
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		!bytes.is_empty() && all_vschar(bytes)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn access_token_from_json() {
		let token: AccessTokenBuf = serde_json::from_str("\"tok123\"").unwrap();
		assert_eq!(token.as_str(), "tok123");
	}

	#[test]
	fn empty_access_token_is_rejected() {
		assert!(serde_json::from_str::<AccessTokenBuf>("\"\"").is_err());
	}
}
