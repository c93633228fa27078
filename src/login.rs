//! Authorization code login against Reddit.
//!
//! A login starts when [`LoginFlow::build_authorization_params`] issues a
//! fresh state token and records it as pending. It ends when the provider
//! redirects back and [`LoginFlow::exchange_code_for_token`] trades the
//! authorization code for an access token, which replaces the pending entry.
//!
//! ```text
//! START -> AWAITING_CALLBACK
//! AWAITING_CALLBACK -> DENIED          (err == access_denied)
//! AWAITING_CALLBACK -> STATE_INVALID   (state unknown, expired or used)
//! AWAITING_CALLBACK -> EXCHANGE_FAILED (transport, status or parse error)
//! AWAITING_CALLBACK -> AUTHENTICATED
//! ```
use std::sync::Arc;

use iref::UriBuf;
use serde::Deserialize;

use crate::{
	CodeBuf, ScopeBuf, State, StateBuf,
	client::{ClientCredentials, ClientError},
	endpoints::{
		ErrorResponse, REDDIT_AUTHORIZATION_URI, REDDIT_TOKEN_URI,
		authorization::{AuthorizationEndpoint, AuthorizationParameters},
		token::{AuthorizationCodeTokenRequest, TokenEndpoint, TokenError, TokenResponse},
	},
	scope,
	session::{Login, SessionStore},
	transport::HttpClient,
	util::QueryError,
};

/// Path the provider redirects the user agent to.
pub const CALLBACK_PATH: &str = "/search";

/// Value of `err` when the user declined the authorization request.
pub const ACCESS_DENIED: &str = "access_denied";

/// Query parameters of the redirect back from the provider.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CallbackQuery {
	pub code: Option<String>,

	pub state: Option<String>,

	#[serde(alias = "error")]
	pub err: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
	#[error("access denied")]
	AccessDenied,

	#[error("authorization failed: {0}")]
	Authorization(String),

	#[error(
		"state returned by reddit does not match the one sent in the initial authorization request"
	)]
	StateMismatch,

	#[error("missing or invalid authorization code")]
	MissingCode,

	#[error("invalid redirect URI for host `{0}`")]
	InvalidRedirectUri(String),

	#[error("unable to build authorization URI: {0}")]
	Query(#[from] QueryError),

	#[error("token exchange failed: {0}")]
	Transport(#[from] ClientError),

	#[error("malformed token response: {0}")]
	MalformedResponse(String),

	#[error("token request rejected: {0}")]
	Provider(ErrorResponse),
}

impl LoginError {
	/// Short name of the error kind, for logs.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::AccessDenied => "AccessDenied",
			Self::Authorization(_) => "Authorization",
			Self::StateMismatch => "StateMismatch",
			Self::MissingCode => "MissingCode",
			Self::InvalidRedirectUri(_) => "InvalidRedirectUri",
			Self::Query(_) => "Query",
			Self::Transport(_) => "TransportFailure",
			Self::MalformedResponse(_) => "MalformedResponse",
			Self::Provider(_) => "Provider",
		}
	}
}

impl From<TokenError> for LoginError {
	fn from(value: TokenError) -> Self {
		match value {
			TokenError::Client(e) => Self::Transport(e),
			TokenError::Malformed(e) => Self::MalformedResponse(e),
			TokenError::Rejected(e) => Self::Provider(e),
		}
	}
}

/// Drives logins for one registered client.
pub struct LoginFlow {
	client: ClientCredentials,
	sessions: Arc<dyn SessionStore>,
	authorization_uri: UriBuf,
	token_uri: UriBuf,
	scope: ScopeBuf,
}

impl LoginFlow {
	/// Creates a flow against Reddit requesting the `history identity`
	/// scope.
	pub fn new(client: ClientCredentials, sessions: Arc<dyn SessionStore>) -> Self {
		Self {
			client,
			sessions,
			authorization_uri: REDDIT_AUTHORIZATION_URI.to_owned(),
			token_uri: REDDIT_TOKEN_URI.to_owned(),
			scope: scope!("history identity").to_owned(),
		}
	}

	pub fn sessions(&self) -> &Arc<dyn SessionStore> {
		&self.sessions
	}

	/// Starts a login for a user agent that reached us through `host`.
	///
	/// The returned state is registered as a pending login.
	pub fn build_authorization_params(
		&self,
		host: &str,
	) -> Result<AuthorizationParameters, LoginError> {
		let redirect_uri = redirect_uri(host, CALLBACK_PATH)?;
		let state = StateBuf::new_random();

		let params = AuthorizationEndpoint::new(&self.client, &self.authorization_uri)
			.authorization_code(state.clone(), redirect_uri, self.scope.clone());

		self.sessions.put(state, Login::Pending);
		log::debug!("issued state {}", params.state.as_str());

		Ok(params)
	}

	/// URI the user agent must visit to authorize the login.
	pub fn authorization_uri(&self, params: &AuthorizationParameters) -> Result<UriBuf, LoginError> {
		let uri = AuthorizationEndpoint::new(&self.client, &self.authorization_uri)
			.authorization_uri(params)?;
		Ok(uri)
	}

	/// Completes a login from the provider's redirect.
	///
	/// `host` and `path` must be those of the redirect request: the
	/// `redirect_uri` sent to the token endpoint has to be identical to the
	/// one of the authorization request.
	///
	/// The state is checked before the code is spent, and the pending login
	/// is only replaced once a token was obtained.
	pub async fn exchange_code_for_token(
		&self,
		query: &CallbackQuery,
		host: &str,
		path: &str,
		http_client: &impl HttpClient,
	) -> Result<TokenResponse, LoginError> {
		let state = query
			.state
			.as_deref()
			.and_then(|state| State::new(state).ok());

		if let Some(err) = query.err.as_deref() {
			if let Some(state) = state
				&& self.sessions.get(state).is_some_and(|login| login.is_pending())
			{
				self.sessions.remove(state);
			}

			return Err(if err == ACCESS_DENIED {
				LoginError::AccessDenied
			} else {
				LoginError::Authorization(err.to_owned())
			});
		}

		let state = state.ok_or(LoginError::StateMismatch)?;
		if !self.sessions.get(state).is_some_and(|login| login.is_pending()) {
			return Err(LoginError::StateMismatch);
		}

		let code = query
			.code
			.clone()
			.and_then(|code| CodeBuf::new(code).ok())
			.ok_or(LoginError::MissingCode)?;

		let request = AuthorizationCodeTokenRequest::new(code, redirect_uri(host, path)?);
		let token = TokenEndpoint::new(&self.client, &self.token_uri)
			.send(&request, http_client)
			.await?;

		self.sessions
			.complete(state, token.clone())
			.map_err(|_| LoginError::StateMismatch)?;

		log::info!("login completed with token type `{}`", token.token_type);
		Ok(token)
	}
}

/// Builds the `http` redirect URI for a request received through `host`.
fn redirect_uri(host: &str, path: &str) -> Result<UriBuf, LoginError> {
	if host.is_empty() || host.contains(['/', '?', '#', '@', '\\']) {
		return Err(LoginError::InvalidRedirectUri(host.to_owned()));
	}

	UriBuf::new(format!("http://{host}{path}").into_bytes())
		.map_err(|_| LoginError::InvalidRedirectUri(host.to_owned()))
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use secrecy::SecretString;

	use super::*;
	use crate::{ClientIdBuf, session::MemorySessionStore, transport::stub::StubClient};

	const TOKEN: &str = r#"{"access_token":"tok123","token_type":"bearer","expires_in":3600,"scope":"history identity"}"#;

	fn flow() -> LoginFlow {
		let client = ClientCredentials::new(
			ClientIdBuf::new("my-client".to_owned()).unwrap(),
			SecretString::new("s3cret".to_owned()),
		);

		LoginFlow::new(client, Arc::new(MemorySessionStore::default()))
	}

	fn callback(code: Option<&str>, state: Option<&str>, err: Option<&str>) -> CallbackQuery {
		CallbackQuery {
			code: code.map(ToOwned::to_owned),
			state: state.map(ToOwned::to_owned),
			err: err.map(ToOwned::to_owned),
		}
	}

	#[test]
	fn authorization_params() {
		let flow = flow();
		let params = flow.build_authorization_params("localhost:4000").unwrap();

		assert_eq!(params.client_id.as_str(), "my-client");
		assert_eq!(params.redirect_uri.as_str(), "http://localhost:4000/search");
		assert_eq!(params.scope.as_str(), "history identity");
		assert_eq!(params.state.as_str().len(), 36);
		assert_eq!(flow.sessions().get(&params.state), Some(Login::Pending));

		let uri = flow.authorization_uri(&params).unwrap();
		assert!(uri.as_str().starts_with("https://www.reddit.com/api/v1/authorize?"));
		assert!(uri.as_str().contains("response_type=code"));
		assert!(uri.as_str().contains("duration=temporary"));
	}

	#[test]
	fn states_are_unique() {
		let flow = flow();
		let states: HashSet<_> = (0..1000)
			.map(|_| flow.build_authorization_params("localhost").unwrap().state)
			.collect();

		assert_eq!(states.len(), 1000);
	}

	#[test]
	fn invalid_host_is_rejected() {
		let flow = flow();
		for host in ["", "evil.example/path?", "user@evil.example", "a b"] {
			assert!(matches!(
				flow.build_authorization_params(host),
				Err(LoginError::InvalidRedirectUri(_))
			));
		}
	}

	#[tokio::test]
	async fn access_denied_makes_no_request() {
		let flow = flow();
		let params = flow.build_authorization_params("localhost").unwrap();
		let http_client = StubClient::json(TOKEN);

		let result = flow
			.exchange_code_for_token(
				&callback(None, Some(params.state.as_str()), Some("access_denied")),
				"localhost",
				CALLBACK_PATH,
				&http_client,
			)
			.await;

		assert!(matches!(result, Err(LoginError::AccessDenied)));
		assert_eq!(http_client.request_count(), 0);
		assert_eq!(flow.sessions().get(&params.state), None);
	}

	#[tokio::test]
	async fn provider_error_alias() {
		let flow = flow();
		let http_client = StubClient::json(TOKEN);

		let query: CallbackQuery =
			serde_html_form::from_str("error=access_denied&state=abc").unwrap();
		let result = flow
			.exchange_code_for_token(&query, "localhost", CALLBACK_PATH, &http_client)
			.await;

		assert!(matches!(result, Err(LoginError::AccessDenied)));

		let result = flow
			.exchange_code_for_token(
				&callback(None, None, Some("invalid_scope")),
				"localhost",
				CALLBACK_PATH,
				&http_client,
			)
			.await;

		assert!(matches!(result, Err(LoginError::Authorization(e)) if e == "invalid_scope"));
		assert_eq!(http_client.request_count(), 0);
	}

	#[tokio::test]
	async fn unknown_state_is_rejected() {
		let flow = flow();
		flow.build_authorization_params("localhost").unwrap();
		let http_client = StubClient::json(TOKEN);

		for query in [
			callback(Some("ABC"), Some("unknown-state"), None),
			callback(None, Some("unknown-state"), None),
			callback(Some("ABC"), None, None),
		] {
			let result = flow
				.exchange_code_for_token(&query, "localhost", CALLBACK_PATH, &http_client)
				.await;
			assert!(matches!(result, Err(LoginError::StateMismatch)));
		}

		assert_eq!(http_client.request_count(), 0);
	}

	#[tokio::test]
	async fn missing_code() {
		let flow = flow();
		let params = flow.build_authorization_params("localhost").unwrap();
		let http_client = StubClient::json(TOKEN);

		let result = flow
			.exchange_code_for_token(
				&callback(None, Some(params.state.as_str()), None),
				"localhost",
				CALLBACK_PATH,
				&http_client,
			)
			.await;

		assert!(matches!(result, Err(LoginError::MissingCode)));
		assert_eq!(http_client.request_count(), 0);
		assert_eq!(flow.sessions().get(&params.state), Some(Login::Pending));
	}

	#[tokio::test]
	async fn token_replaces_pending_login() {
		let flow = flow();
		let params = flow.build_authorization_params("localhost:4000").unwrap();
		let http_client = StubClient::json(TOKEN);

		let token = flow
			.exchange_code_for_token(
				&callback(Some("ABC"), Some(params.state.as_str()), None),
				"localhost:4000",
				CALLBACK_PATH,
				&http_client,
			)
			.await
			.unwrap();

		let expected: TokenResponse = serde_json::from_str(TOKEN).unwrap();
		assert_eq!(token, expected);
		assert_eq!(
			flow.sessions().get(&params.state),
			Some(Login::Authenticated(expected))
		);

		let requests = http_client.requests();
		assert_eq!(requests.len(), 1);
		assert!(
			std::str::from_utf8(requests[0].body())
				.unwrap()
				.ends_with("redirect_uri=http%3A%2F%2Flocalhost%3A4000%2Fsearch")
		);
	}

	#[tokio::test]
	async fn long_lived_token_is_recorded() {
		let flow = flow();
		let params = flow.build_authorization_params("localhost").unwrap();
		let http_client = StubClient::json(
			r#"{"access_token":"tok123","token_type":"bearer","expires_in":18446744073709551615}"#,
		);

		let token = flow
			.exchange_code_for_token(
				&callback(Some("ABC"), Some(params.state.as_str()), None),
				"localhost",
				CALLBACK_PATH,
				&http_client,
			)
			.await
			.unwrap();

		assert_eq!(token.expires_in, Some(u64::MAX));
		assert_eq!(
			flow.sessions().get(&params.state),
			Some(Login::Authenticated(token))
		);
	}

	#[tokio::test]
	async fn replayed_callback_is_rejected() {
		let flow = flow();
		let params = flow.build_authorization_params("localhost").unwrap();
		let http_client = StubClient::json(TOKEN);
		let query = callback(Some("ABC"), Some(params.state.as_str()), None);

		flow.exchange_code_for_token(&query, "localhost", CALLBACK_PATH, &http_client)
			.await
			.unwrap();

		let result = flow
			.exchange_code_for_token(&query, "localhost", CALLBACK_PATH, &http_client)
			.await;

		assert!(matches!(result, Err(LoginError::StateMismatch)));
		assert_eq!(http_client.request_count(), 1);
	}

	#[tokio::test]
	async fn malformed_response_keeps_pending_login() {
		let flow = flow();
		let params = flow.build_authorization_params("localhost").unwrap();

		let result = flow
			.exchange_code_for_token(
				&callback(Some("ABC"), Some(params.state.as_str()), None),
				"localhost",
				CALLBACK_PATH,
				&StubClient::json(r#"{"access_token": 42"#),
			)
			.await;

		assert!(matches!(result, Err(LoginError::MalformedResponse(_))));
		assert_eq!(flow.sessions().get(&params.state), Some(Login::Pending));
	}

	#[tokio::test]
	async fn transport_failure_keeps_pending_login() {
		let flow = flow();
		let params = flow.build_authorization_params("localhost").unwrap();

		let result = flow
			.exchange_code_for_token(
				&callback(Some("ABC"), Some(params.state.as_str()), None),
				"localhost",
				CALLBACK_PATH,
				&StubClient::failing("timed out"),
			)
			.await;

		assert!(matches!(result, Err(LoginError::Transport(_))));
		assert_eq!(result.unwrap_err().kind(), "TransportFailure");
		assert_eq!(flow.sessions().get(&params.state), Some(Login::Pending));
	}
}
