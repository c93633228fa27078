//! OAuth 2.0 client identity and transport error types.
use base64::{Engine, prelude::BASE64_STANDARD};
use secrecy::{ExposeSecret, SecretString};

use crate::{ClientId, ClientIdBuf};

/// Registered OAuth 2.0 client.
pub trait OAuth2Client {
	fn client_id(&self) -> &ClientId;

	/// Value of the `Authorization` header authenticating the client at the
	/// token endpoint.
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-2.3.1>
	fn authorization(&self) -> String;

	/// `User-Agent` sent along with every request made on behalf of this
	/// client.
	fn user_agent(&self) -> &str;
}

/// User agent identifying this application to Reddit.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/105.0.0.0 Safari/537.36:history:v0.1";

/// Confidential client authenticated with HTTP Basic credentials.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
	client_id: ClientIdBuf,
	client_secret: SecretString,
	user_agent: String,
}

impl ClientCredentials {
	pub fn new(client_id: ClientIdBuf, client_secret: SecretString) -> Self {
		Self {
			client_id,
			client_secret,
			user_agent: DEFAULT_USER_AGENT.to_owned(),
		}
	}

	pub fn with_user_agent(self, user_agent: impl Into<String>) -> Self {
		Self {
			user_agent: user_agent.into(),
			..self
		}
	}
}

impl OAuth2Client for ClientCredentials {
	fn client_id(&self) -> &ClientId {
		self.client_id.as_client_id()
	}

	fn authorization(&self) -> String {
		let credentials = format!(
			"{}:{}",
			self.client_id.as_str(),
			self.client_secret.expose_secret()
		);

		format!("Basic {}", BASE64_STANDARD.encode(credentials))
	}

	fn user_agent(&self) -> &str {
		&self.user_agent
	}
}

/// Error raised while talking to the provider over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
	#[error("unable to send request: {0}")]
	Request(String),

	#[error("unable to receive response: {0}")]
	Response(String),

	#[error("server responded with status code: {0}")]
	ServerError(http::StatusCode),
}

impl ClientError {
	pub fn request(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("request error: {msg}");
		Self::Request(msg)
	}

	pub fn response(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("response error: {msg}");
		Self::Response(msg)
	}

	pub fn server(status: http::StatusCode) -> Self {
		log::error!("unexpected server response status: {status}");
		Self::ServerError(status)
	}
}
