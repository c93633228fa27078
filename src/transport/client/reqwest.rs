use std::time::Duration;

use crate::{client::ClientError, transport::HttpClient};

/// Builds the [`reqwest::Client`] used for the token exchange.
///
/// Every request is bounded by `timeout`, so an unresponsive provider fails
/// the exchange instead of stalling the handler.
pub fn reqwest_client(timeout: Duration) -> Result<reqwest::Client, ClientError> {
	reqwest::Client::builder()
		.timeout(timeout)
		.build()
		.map_err(ClientError::request)
}

impl HttpClient for reqwest::Client {
	async fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, ClientError> {
		log::debug!("HTTP request to: {}", request.uri());

		let response = self
			.execute(request.try_into().map_err(ClientError::request)?)
			.await
			.map_err(ClientError::request)?;

		let mut builder = http::Response::builder()
			.status(response.status())
			.version(response.version());

		for (name, value) in response.headers().iter() {
			builder = builder.header(name, value);
		}

		let response = builder
			.body(
				response
					.bytes()
					.await
					.map_err(ClientError::response)?
					.to_vec(),
			)
			.map_err(ClientError::response)?;

		log::debug!("HTTP response status: {}", response.status());

		Ok(response)
	}
}
