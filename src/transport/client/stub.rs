//! Recording [`HttpClient`] used by the tests.
use std::sync::{Mutex, MutexGuard};

use http::{StatusCode, header};

use crate::{
	client::ClientError,
	transport::{APPLICATION_JSON, HttpClient},
};

/// Returns a canned response and records every request it receives.
pub struct StubClient {
	response: Result<(StatusCode, Vec<u8>), String>,
	requests: Mutex<Vec<http::Request<Vec<u8>>>>,
}

impl StubClient {
	/// Answers every request with `200 OK` and the given JSON body.
	pub fn json(body: &str) -> Self {
		Self::with_status(StatusCode::OK, body)
	}

	/// Answers every request with the given status and JSON body.
	pub fn with_status(status: StatusCode, body: &str) -> Self {
		Self {
			response: Ok((status, body.as_bytes().to_vec())),
			requests: Mutex::new(Vec::new()),
		}
	}

	/// Fails every request as if the network was down.
	pub fn failing(message: &str) -> Self {
		Self {
			response: Err(message.to_owned()),
			requests: Mutex::new(Vec::new()),
		}
	}

	pub fn requests(&self) -> MutexGuard<'_, Vec<http::Request<Vec<u8>>>> {
		self.requests.lock().unwrap()
	}

	pub fn request_count(&self) -> usize {
		self.requests().len()
	}
}

impl HttpClient for StubClient {
	async fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, ClientError> {
		self.requests().push(request);

		match &self.response {
			Ok((status, body)) => Ok(http::Response::builder()
				.status(*status)
				.header(header::CONTENT_TYPE, APPLICATION_JSON)
				.body(body.clone())
				.unwrap()),
			Err(message) => Err(ClientError::request(message)),
		}
	}
}
