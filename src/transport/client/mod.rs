use std::future::Future;

use crate::client::ClientError;

#[cfg(feature = "reqwest")]
mod reqwest;

#[cfg(feature = "reqwest")]
pub use self::reqwest::*;

#[cfg(test)]
pub mod stub;

/// Outbound HTTP transport.
///
/// The token exchange only depends on this trait, so tests can swap the
/// network for a stub.
pub trait HttpClient: Send + Sync {
	fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> impl Send + Future<Output = Result<http::Response<Vec<u8>>, ClientError>>;
}

impl<T> HttpClient for &T
where
	T: HttpClient,
{
	fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> impl Send + Future<Output = Result<http::Response<Vec<u8>>, ClientError>> {
		T::send(*self, request)
	}
}
