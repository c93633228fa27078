use iref::{Uri, UriBuf};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
	AccessTokenBuf, CodeBuf, ScopeBuf,
	client::{ClientError, OAuth2Client},
	endpoints::{ErrorResponse, SendRequest, ServerResult},
	transport::{
		APPLICATION_JSON, APPLICATION_X_WWW_FORM_URLENCODED, HttpClient, encode_form,
		expect_content_type,
	},
};

pub struct TokenEndpoint<'a, C> {
	pub client: &'a C,
	pub uri: &'a Uri,
}

impl<'a, C> Clone for TokenEndpoint<'a, C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, C> Copy for TokenEndpoint<'a, C> {}

impl<'a, C> TokenEndpoint<'a, C> {
	pub fn new(client: &'a C, uri: &'a Uri) -> Self {
		Self { client, uri }
	}

	/// Sends `request` to this endpoint.
	///
	/// The request is sent exactly once: authorization codes are single-use,
	/// so a retry could only fail.
	pub async fn send<R>(
		&self,
		request: &R,
		http_client: &impl HttpClient,
	) -> Result<R::Response, R::Error>
	where
		R: SendRequest<Self>,
	{
		let http_request = request.build_request(self)?;
		let http_response = http_client.send(http_request).await?;
		request.decode_response(self, http_response)
	}
}

/// Error returned by the token endpoint exchange.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
	#[error(transparent)]
	Client(#[from] ClientError),

	#[error("malformed token response: {0}")]
	Malformed(String),

	#[error("token request rejected: {0}")]
	Rejected(ErrorResponse),
}

impl TokenError {
	pub fn malformed(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("malformed token response: {msg}");
		Self::Malformed(msg)
	}

	pub fn rejected(response: ErrorResponse) -> Self {
		log::error!("token request rejected: {response}");
		Self::Rejected(response)
	}
}

/// Access Token Request with the Authorization Code Grant.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.3>
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "grant_type", rename = "authorization_code")]
pub struct AuthorizationCodeTokenRequest {
	pub code: CodeBuf,

	/// Must be identical to the `redirect_uri` of the authorization request.
	pub redirect_uri: UriBuf,
}

impl AuthorizationCodeTokenRequest {
	pub fn new(code: CodeBuf, redirect_uri: UriBuf) -> Self {
		Self { code, redirect_uri }
	}
}

impl<'a, C> SendRequest<TokenEndpoint<'a, C>> for AuthorizationCodeTokenRequest
where
	C: OAuth2Client,
{
	type Response = TokenResponse;
	type Error = TokenError;

	fn build_request(
		&self,
		endpoint: &TokenEndpoint<'a, C>,
	) -> Result<http::Request<Vec<u8>>, TokenError> {
		let request = http::Request::builder()
			.method(http::Method::POST)
			.uri(endpoint.uri.as_str())
			.header(http::header::AUTHORIZATION, endpoint.client.authorization())
			.header(http::header::USER_AGENT, endpoint.client.user_agent())
			.header(
				http::header::CONTENT_TYPE,
				APPLICATION_X_WWW_FORM_URLENCODED,
			)
			.header(http::header::ACCEPT, APPLICATION_JSON)
			.body(encode_form(self)?)
			.map_err(ClientError::request)?;

		Ok(request)
	}

	fn decode_response(
		&self,
		_endpoint: &TokenEndpoint<'a, C>,
		response: http::Response<Vec<u8>>,
	) -> Result<TokenResponse, TokenError> {
		let status = response.status();
		if status != http::StatusCode::OK {
			return match serde_json::from_slice::<ErrorResponse>(response.body()) {
				Ok(error) => Err(TokenError::rejected(error)),
				Err(_) => Err(ClientError::server(status).into()),
			};
		}

		expect_content_type(response.headers(), &APPLICATION_JSON)
			.map_err(TokenError::malformed)?;

		match serde_json::from_slice(response.body()) {
			Ok(ServerResult::Ok(token)) => Ok(token),
			Ok(ServerResult::Err(error)) => Err(TokenError::rejected(error)),
			Err(e) => Err(TokenError::malformed(e)),
		}
	}
}

/// Successful response of the token endpoint.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-5.1>
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
	/// Access token issued by the authorization server.
	pub access_token: AccessTokenBuf,

	/// The type of the token issued. Reddit always answers `bearer`.
	pub token_type: String,

	/// Lifetime in seconds of the access token.
	pub expires_in: Option<u64>,

	/// Only issued for `permanent` authorization requests.
	pub refresh_token: Option<String>,

	/// Scope of the access token.
	pub scope: Option<ScopeBuf>,
}
