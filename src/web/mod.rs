//! HTML front-end.
//!
//! - `GET /` renders the landing page and starts a login.
//! - `GET /search` receives the provider's redirect and completes it.
//! - `GET /static/*` serves the assets of the `static` directory.
use std::{path::Path, sync::Arc};

use axum::{Router, routing::get};
use tower_http::services::ServeDir;

use crate::{
	login::{CALLBACK_PATH, LoginFlow},
	transport::HttpClient,
};

mod error;
mod handlers;
mod templates;

pub use error::Error;
pub use templates::Templates;

/// State shared by every request handler.
pub struct AppState<H> {
	pub login: Arc<LoginFlow>,
	pub http_client: Arc<H>,
	pub templates: Arc<Templates>,
}

impl<H> AppState<H> {
	pub fn new(login: LoginFlow, http_client: H, templates: Templates) -> Self {
		Self {
			login: Arc::new(login),
			http_client: Arc::new(http_client),
			templates: Arc::new(templates),
		}
	}
}

impl<H> Clone for AppState<H> {
	fn clone(&self) -> Self {
		Self {
			login: self.login.clone(),
			http_client: self.http_client.clone(),
			templates: self.templates.clone(),
		}
	}
}

/// Builds the application router.
pub fn router<H>(state: AppState<H>, static_dir: impl AsRef<Path>) -> Router
where
	H: HttpClient + 'static,
{
	// `get` also answers `HEAD` unless a `head` handler is set.
	Router::new()
		.route(
			"/",
			get(handlers::home::<H>)
				.head(error::not_found_allow_get)
				.fallback(error::not_found_allow_get),
		)
		.route(
			CALLBACK_PATH,
			get(handlers::search::<H>)
				.head(error::method_not_allowed)
				.fallback(error::method_not_allowed),
		)
		.nest_service("/static", ServeDir::new(static_dir.as_ref()))
		.fallback(error::not_found)
		.with_state(state)
}
