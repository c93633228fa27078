//! Core OAuth 2.0 types.
//!
//! This module defines the string types exchanged with the provider during
//! the authorization code flow, each validated against the grammar specified
//! in [RFC 6749](https://datatracker.ietf.org/doc/html/rfc6749).
//!
//! All types come in borrowed/owned pairs (e.g. [`AccessToken`] /
//! [`AccessTokenBuf`]) following the same pattern as [`str`] / [`String`].
mod access_token;
mod client_id;
mod code;
mod scope;
mod state;

pub use access_token::*;
pub use client_id::*;
pub use code::*;
pub use scope::*;
pub use state::*;

/// Returns `true` if the byte is a VSCHAR (visible ASCII character plus
/// space), i.e. in the range `0x20..=0x7E`.
const fn is_vschar(c: u8) -> bool {
	c >= 0x20 && c <= 0x7e
}

/// Returns `true` if the byte is a NQCHAR, i.e. a VSCHAR other than space,
/// double quote and backslash.
const fn is_nqchar(c: u8) -> bool {
	matches!(c, 0x21 | 0x23..=0x5b | 0x5d..=0x7e)
}

/// Returns `true` if every byte of `bytes` is a VSCHAR.
const fn all_vschar(bytes: &[u8]) -> bool {
	let mut i = 0;

	while i < bytes.len() {
		if !is_vschar(bytes[i]) {
			return false;
		}

		i += 1
	}

	true
}
