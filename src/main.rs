use std::sync::Arc;

use clap::Parser;
use reddit_history::{
	config::Config,
	login::LoginFlow,
	session::{MemorySessionStore, spawn_sweeper},
	transport::reqwest_client,
	web::{AppState, Templates, router},
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	init_logging();

	let config = Config::parse();

	let sessions = Arc::new(MemorySessionStore::new(config.login_ttl()));
	spawn_sweeper(sessions.clone(), config.login_ttl());

	let login = LoginFlow::new(config.credentials()?, sessions);
	let state = AppState::new(
		login,
		reqwest_client(config.http_timeout())?,
		Templates::new(config.templates_dir()),
	);
	let app = router(state, config.static_dir());

	let listener = TcpListener::bind(config.listen).await?;
	log::info!("starting server on {}", config.listen);

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	Ok(())
}

fn init_logging() {
	let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned());
	pretty_env_logger::formatted_builder()
		.parse_filters(&filters)
		.init();
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		log::error!("unable to listen for shutdown signal: {e}");
		std::future::pending::<()>().await;
	}

	log::info!("shutting down");
}
