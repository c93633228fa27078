//! Command line and environment configuration.
use std::{net::SocketAddr, path::PathBuf, time::Duration};

use clap::Parser;
use secrecy::SecretString;

use crate::{
	ClientIdBuf,
	client::{ClientCredentials, DEFAULT_USER_AGENT},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid client identifier")]
	InvalidClientId,
}

/// Reddit login front-end.
#[derive(Parser)]
#[command(name = "reddit-history", version)]
pub struct Config {
	/// Client identifier of the Reddit application.
	#[arg(long, env = "ClientID")]
	pub client_id: String,

	/// Client secret of the Reddit application.
	#[arg(long, env = "ClientSecret", hide_env_values = true)]
	pub client_secret: String,

	/// `User-Agent` sent to Reddit.
	#[arg(long, default_value = DEFAULT_USER_AGENT)]
	pub user_agent: String,

	/// Address to listen on.
	#[arg(long, default_value = "0.0.0.0:4000")]
	pub listen: SocketAddr,

	/// Directory containing the `html` templates and `static` assets.
	#[arg(long, default_value = "./ui")]
	pub ui_dir: PathBuf,

	/// Seconds a user has to complete a login.
	#[arg(long, default_value_t = 600)]
	pub login_ttl_secs: u64,

	/// Timeout of the token exchange request, in seconds.
	#[arg(long, default_value_t = 10)]
	pub http_timeout_secs: u64,
}

impl Config {
	pub fn credentials(&self) -> Result<ClientCredentials, ConfigError> {
		let client_id =
			ClientIdBuf::new(self.client_id.clone()).map_err(|_| ConfigError::InvalidClientId)?;

		Ok(ClientCredentials::new(
			client_id,
			SecretString::new(self.client_secret.clone()),
		)
		.with_user_agent(&self.user_agent))
	}

	pub fn login_ttl(&self) -> Duration {
		Duration::from_secs(self.login_ttl_secs)
	}

	pub fn http_timeout(&self) -> Duration {
		Duration::from_secs(self.http_timeout_secs)
	}

	pub fn templates_dir(&self) -> PathBuf {
		self.ui_dir.join("html")
	}

	pub fn static_dir(&self) -> PathBuf {
		self.ui_dir.join("static")
	}
}
