use str_newtype::StrNewType;

use super::is_nqchar;

/// An OAuth 2.0 scope value (borrowed).
///
/// A scope is a space-separated list of tokens naming the permissions
/// requested or granted for an access token. Reddit uses scopes such as
/// `history` and `identity`.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-3.3>
///
/// # Grammar
///
/// ```abnf
/// scope       = scope-token *( SP scope-token )
/// scope-token = 1*NQCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(serde, owned(ScopeBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash)))]
pub struct Scope(str);

impl Scope {
	/// Validates that the given string is a well-formed scope.
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	/// Validates that the given byte slice is a well-formed scope.
	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		let mut i = 0;

		let mut expect_token = true;
		while expect_token {
			expect_token = false;
			let mut scope_token_empty = true;

			while i < bytes.len() {
				match bytes[i] {
					c if is_nqchar(c) => {
						scope_token_empty = false;
						i += 1;
					}
					b' ' => {
						expect_token = true;
						i += 1;
						break;
					}
					_ => return false,
				}
			}

			if scope_token_empty {
				return false;
			}
		}

		true
	}

	/// Returns `true` if this scope contains the given token.
	pub fn contains(&self, token: &str) -> bool {
		self.iter().any(|t| t == token)
	}

	/// Returns an iterator over the individual scope tokens.
	pub fn iter(&self) -> std::str::Split<'_, char> {
		self.0.split(' ')
	}
}

#[macro_export]
macro_rules! scope {
	($value:literal) => {{
		match $crate::Scope::new($value) {
			Ok(value) => value,
			Err(_) => panic!("invalid scope"),
		}
	}};
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn valid_scope() {
		assert!(Scope::new("identity").is_ok());
		assert!(Scope::new("history identity").is_ok());
		assert!(Scope::new("*").is_ok());
	}

	#[test]
	fn empty_scope_is_invalid() {
		assert!(Scope::new("").is_err());
	}

	#[test]
	fn scope_rejects_misplaced_spaces() {
		assert!(Scope::new(" identity").is_err());
		assert!(Scope::new("identity ").is_err());
		assert!(Scope::new("history  identity").is_err());
	}

	#[test]
	fn scope_rejects_invalid_token_chars() {
		assert!(Scope::new("hist\"ory").is_err());
		assert!(Scope::new("hist\\ory").is_err());
	}

	#[test]
	fn scope_iter() {
		let scope = Scope::new("history identity read").unwrap();
		let tokens: Vec<&str> = scope.iter().collect();
		assert_eq!(tokens, vec!["history", "identity", "read"]);
	}

	#[test]
	fn scope_contains() {
		let scope = scope!("history identity");
		assert!(scope.contains("identity"));
		assert!(!scope.contains("read"));
	}
}
