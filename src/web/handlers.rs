use axum::{
	extract::{Query, State, rejection::QueryRejection},
	http::{HeaderMap, Uri, header},
	response::Html,
};
use minijinja::context;

use crate::{login::CallbackQuery, transport::HttpClient};

use super::{
	AppState, Error,
	templates::{HOME_PAGE, SEARCH_PAGE},
};

/// Landing page.
///
/// Every visit starts a new login.
pub async fn home<H>(
	State(state): State<AppState<H>>,
	headers: HeaderMap,
	uri: Uri,
) -> Result<Html<String>, Error> {
	let host = request_host(&headers, &uri)?;
	let params = state.login.build_authorization_params(host)?;
	let authorization_uri = state.login.authorization_uri(&params)?;

	let page = state.templates.render(
		HOME_PAGE,
		context! {
			params,
			authorization_uri => authorization_uri.as_str(),
		},
	)?;

	Ok(Html(page))
}

/// Redirect target of the authorization request.
pub async fn search<H>(
	State(state): State<AppState<H>>,
	headers: HeaderMap,
	uri: Uri,
	query: Result<Query<CallbackQuery>, QueryRejection>,
) -> Result<Html<String>, Error>
where
	H: HttpClient,
{
	let Query(query) = query?;
	let host = request_host(&headers, &uri)?;
	let token = state
		.login
		.exchange_code_for_token(&query, host, uri.path(), state.http_client.as_ref())
		.await?;

	let page = state.templates.render(
		SEARCH_PAGE,
		context! {
			scope => token.scope.as_ref().map(|scope| scope.as_str()),
		},
	)?;

	Ok(Html(page))
}

/// Host the user agent used to reach us.
fn request_host<'a>(headers: &'a HeaderMap, uri: &'a Uri) -> Result<&'a str, Error> {
	headers
		.get(header::HOST)
		.and_then(|host| host.to_str().ok())
		.or_else(|| uri.authority().map(|authority| authority.as_str()))
		.ok_or(Error::MissingHost)
}
