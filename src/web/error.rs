use axum::{
	extract::rejection::QueryRejection,
	http::{StatusCode, header},
	response::{IntoResponse, Response},
};

use crate::login::LoginError;

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
pub const NOT_FOUND: &str = "404 page not found";
pub const BAD_REQUEST: &str = "Bad Request";

/// Request handling error.
///
/// The details are logged and never sent to the user agent.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Login(#[from] LoginError),

	#[error("invalid callback query: {0}")]
	Callback(#[from] QueryRejection),

	#[error("unable to render template: {0}")]
	Template(#[from] minijinja::Error),

	#[error("missing host")]
	MissingHost,
}

impl Error {
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Login(e) => e.kind(),
			Self::Callback(_) => "MalformedCallback",
			Self::Template(_) => "TemplateRenderFailure",
			Self::MissingHost => "MissingHost",
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		match self {
			Self::MissingHost => {
				log::warn!("{}: {self}", self.kind());
				(StatusCode::BAD_REQUEST, BAD_REQUEST).into_response()
			}
			e => {
				log::error!("{}: {e}", e.kind());
				(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR).into_response()
			}
		}
	}
}

pub async fn not_found() -> Response {
	(StatusCode::NOT_FOUND, NOT_FOUND).into_response()
}

/// Only `GET` is routed on `/`; anything else is reported as not found.
pub async fn not_found_allow_get() -> Response {
	(StatusCode::NOT_FOUND, [(header::ALLOW, "GET")], NOT_FOUND).into_response()
}

pub async fn method_not_allowed() -> Response {
	(
		StatusCode::METHOD_NOT_ALLOWED,
		[(header::ALLOW, "GET")],
		METHOD_NOT_ALLOWED,
	)
		.into_response()
}
