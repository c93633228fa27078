use iref::{Uri, UriBuf};
use serde::Serialize;

use crate::{
	ClientIdBuf, ScopeBuf, StateBuf,
	client::OAuth2Client,
	util::{QueryError, extend_uri_query},
};

/// Requested response type. Only the authorization code grant is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
	Code,
}

/// How long the issued access token should remain usable.
///
/// Only one-hour tokens without refresh token are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenDuration {
	Temporary,
}

/// Query parameters of an authorization request.
///
/// See: <https://github.com/reddit-archive/reddit/wiki/OAuth2#authorization>
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationParameters {
	pub client_id: ClientIdBuf,
	pub response_type: ResponseType,
	pub state: StateBuf,
	pub redirect_uri: UriBuf,
	pub duration: TokenDuration,
	pub scope: ScopeBuf,
}

impl AuthorizationParameters {
	/// Builds the URI the user agent must be sent to.
	pub fn to_uri(&self, endpoint: &Uri) -> Result<UriBuf, QueryError> {
		let mut uri = endpoint.to_owned();
		extend_uri_query(&mut uri, self)?;
		Ok(uri)
	}
}

pub struct AuthorizationEndpoint<'a, C> {
	pub client: &'a C,
	pub uri: &'a Uri,
}

impl<'a, C> AuthorizationEndpoint<'a, C> {
	pub fn new(client: &'a C, uri: &'a Uri) -> Self {
		Self { client, uri }
	}
}

impl<'a, C> Clone for AuthorizationEndpoint<'a, C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, C> Copy for AuthorizationEndpoint<'a, C> {}

impl<'a, C: OAuth2Client> AuthorizationEndpoint<'a, C> {
	/// Builds the parameters of an authorization code request.
	pub fn authorization_code(
		self,
		state: StateBuf,
		redirect_uri: UriBuf,
		scope: ScopeBuf,
	) -> AuthorizationParameters {
		AuthorizationParameters {
			client_id: self.client.client_id().to_owned(),
			response_type: ResponseType::Code,
			state,
			redirect_uri,
			duration: TokenDuration::Temporary,
			scope,
		}
	}

	/// URI of this endpoint carrying the given request parameters.
	pub fn authorization_uri(
		&self,
		params: &AuthorizationParameters,
	) -> Result<UriBuf, QueryError> {
		params.to_uri(self.uri)
	}
}

#[cfg(test)]
mod tests {
	use iref::uri;
	use secrecy::SecretString;

	use super::*;
	use crate::{client::ClientCredentials, endpoints::REDDIT_AUTHORIZATION_URI, scope};

	#[test]
	fn authorization_uri() {
		let client = ClientCredentials::new(
			ClientIdBuf::new("my-client".to_owned()).unwrap(),
			SecretString::new("s3cret".to_owned()),
		);

		let endpoint = AuthorizationEndpoint::new(&client, REDDIT_AUTHORIZATION_URI);
		let params = endpoint.authorization_code(
			StateBuf::new("abc".to_owned()).unwrap(),
			uri!("http://localhost:4000/search").to_owned(),
			scope!("history identity").to_owned(),
		);

		assert_eq!(
			endpoint.authorization_uri(&params).unwrap().as_str(),
			"https://www.reddit.com/api/v1/authorize?client_id=my-client&response_type=code&state=abc&redirect_uri=http%3A%2F%2Flocalhost%3A4000%2Fsearch&duration=temporary&scope=history+identity"
		);
	}
}
