//! Endpoint abstractions for the authorization code grant.
//!
//! - [`authorization`] builds the parameters the user agent is redirected
//!   with.
//! - [`token`] exchanges the authorization code for an access token.
use std::fmt;

use iref::{Uri, UriBuf, uri};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::client::ClientError;

pub mod authorization;
pub mod token;

/// Reddit authorization endpoint.
pub const REDDIT_AUTHORIZATION_URI: &Uri = uri!("https://www.reddit.com/api/v1/authorize");

/// Reddit token endpoint.
pub const REDDIT_TOKEN_URI: &Uri = uri!("https://www.reddit.com/api/v1/access_token");

/// Request that can be sent to an endpoint of type `E`.
pub trait SendRequest<E> {
	type Response;
	type Error: From<ClientError>;

	fn build_request(&self, endpoint: &E) -> Result<http::Request<Vec<u8>>, Self::Error>;

	fn decode_response(
		&self,
		endpoint: &E,
		response: http::Response<Vec<u8>>,
	) -> Result<Self::Response, Self::Error>;
}

/// Error code returned by the token endpoint.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-5.2>
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenErrorCode {
	InvalidRequest,
	InvalidClient,
	InvalidGrant,
	UnauthorizedClient,
	UnsupportedGrantType,
	InvalidScope,
}

impl TokenErrorCode {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::InvalidRequest => "invalid_request",
			Self::InvalidClient => "invalid_client",
			Self::InvalidGrant => "invalid_grant",
			Self::UnauthorizedClient => "unauthorized_client",
			Self::UnsupportedGrantType => "unsupported_grant_type",
			Self::InvalidScope => "invalid_scope",
		}
	}
}

/// Error identifier found in a provider error body.
///
/// Reddit does not always follow RFC 6749 here: failed client authentication
/// yields `{"message": "Unauthorized", "error": 401}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
	Standard(TokenErrorCode),
	Status(u16),
	Other(String),
}

impl fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Standard(code) => f.write_str(code.as_str()),
			Self::Status(status) => write!(f, "{status}"),
			Self::Other(code) => f.write_str(code),
		}
	}
}

/// An OAuth 2.0 error response.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-5.2>
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse<T = ErrorCode> {
	/// A single error code.
	pub error: T,

	/// Human-readable text providing additional information about the error.
	pub error_description: Option<String>,

	/// A URI identifying a human-readable web page with information about
	/// the error.
	pub error_uri: Option<UriBuf>,
}

impl<T> ErrorResponse<T> {
	pub fn new(error: T, error_description: Option<String>, error_uri: Option<UriBuf>) -> Self {
		Self {
			error,
			error_description,
			error_uri,
		}
	}
}

impl<T: fmt::Display> fmt::Display for ErrorResponse<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.error_description {
			Some(description) => write!(f, "{} ({description})", self.error),
			None => self.error.fmt(f),
		}
	}
}

/// Result type that deserializes as either a success payload or an
/// [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerResult<T, E = ErrorCode> {
	/// The request succeeded.
	Ok(T),

	/// The server returned an error.
	Err(ErrorResponse<E>),
}
