//! HTTP transport layer, content type encoding, and client abstraction.
use http::{HeaderMap, HeaderValue, header};
use serde::Serialize;

use crate::client::ClientError;

mod client;

pub use client::*;

/// `Content-Type: application/json` header value.
pub const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

/// `Content-Type: application/x-www-form-urlencoded` header value.
pub const APPLICATION_X_WWW_FORM_URLENCODED: HeaderValue =
	HeaderValue::from_static("application/x-www-form-urlencoded");

/// Validates that the response `Content-Type` header matches the expected
/// value.
///
/// Parameters such as `charset` are ignored. Returns an error if the header
/// is missing or does not match.
pub fn expect_content_type(
	headers: &HeaderMap,
	expected_value: &HeaderValue,
) -> ::std::result::Result<(), ClientError> {
	let content_type = headers
		.get(header::CONTENT_TYPE)
		.ok_or_else(|| ClientError::response("missing content type"))?;

	if !content_type
		.as_bytes()
		.starts_with(expected_value.as_bytes())
	{
		Err(ClientError::response("unexpected content type"))
	} else {
		Ok(())
	}
}

/// Serializes `value` as an `application/x-www-form-urlencoded` request body.
pub fn encode_form<T: Serialize>(value: &T) -> Result<Vec<u8>, ClientError> {
	log::debug!("serializing {}", std::any::type_name_of_val(value));
	serde_html_form::to_string(value)
		.map(String::into_bytes)
		.map_err(ClientError::request)
}
