//! In-memory login sessions keyed by state token.
use std::{
	sync::Arc,
	time::{Duration, Instant},
};

use dashmap::DashMap;
use tokio::task::JoinHandle;

use crate::{State, StateBuf, endpoints::token::TokenResponse};

/// Default lifetime of a pending login.
pub const DEFAULT_LOGIN_TTL: Duration = Duration::from_secs(600);

/// Shortest period between two sweeps.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Longest period between two sweeps.
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

/// Progress of a single login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Login {
	/// The state was issued and the provider has not redirected back yet.
	Pending,

	/// The authorization code was exchanged for a token.
	Authenticated(TokenResponse),
}

impl Login {
	pub fn is_pending(&self) -> bool {
		matches!(self, Self::Pending)
	}
}

/// The state is unknown, expired, or already used.
#[derive(Debug, thiserror::Error)]
#[error("no pending login for this state")]
pub struct NotPending;

/// Storage for login sessions.
///
/// Implementations are shared by every request handler and must be safe to
/// use concurrently.
pub trait SessionStore: Send + Sync {
	fn put(&self, state: StateBuf, login: Login);

	fn get(&self, state: &State) -> Option<Login>;

	fn remove(&self, state: &State) -> Option<Login>;

	/// Atomically replaces the pending login of `state` with the given token.
	///
	/// Fails, leaving the store untouched, if `state` does not name a pending
	/// login.
	fn complete(&self, state: &State, token: TokenResponse) -> Result<(), NotPending>;

	/// Drops expired sessions, returning how many were removed.
	fn sweep(&self) -> usize;
}

struct Entry {
	login: Login,

	/// `None` when the lifetime reaches past any representable instant.
	expires_at: Option<Instant>,
}

impl Entry {
	fn is_expired(&self, now: Instant) -> bool {
		self.expires_at.is_some_and(|expires_at| now >= expires_at)
	}
}

/// Process-local [`SessionStore`].
///
/// Pending logins live for the configured TTL. Authenticated logins live
/// as long as their access token, or for the TTL when the provider did not
/// say.
pub struct MemorySessionStore {
	entries: DashMap<StateBuf, Entry>,
	ttl: Duration,
}

impl MemorySessionStore {
	pub fn new(ttl: Duration) -> Self {
		Self {
			entries: DashMap::new(),
			ttl,
		}
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	fn lifetime(&self, login: &Login) -> Duration {
		match login {
			Login::Pending => self.ttl,
			Login::Authenticated(token) => token
				.expires_in
				.map(Duration::from_secs)
				.unwrap_or(self.ttl),
		}
	}

	fn expires_at(&self, now: Instant, login: &Login) -> Option<Instant> {
		now.checked_add(self.lifetime(login))
	}
}

impl Default for MemorySessionStore {
	fn default() -> Self {
		Self::new(DEFAULT_LOGIN_TTL)
	}
}

impl SessionStore for MemorySessionStore {
	fn put(&self, state: StateBuf, login: Login) {
		let expires_at = self.expires_at(Instant::now(), &login);
		self.entries.insert(state, Entry { login, expires_at });
	}

	fn get(&self, state: &State) -> Option<Login> {
		let now = Instant::now();
		let entry = self.entries.get(state)?;

		if entry.is_expired(now) {
			// The shard lock must be released before removing.
			drop(entry);
			self.entries.remove_if(state, |_, entry| entry.is_expired(now));
			return None;
		}

		Some(entry.login.clone())
	}

	fn remove(&self, state: &State) -> Option<Login> {
		let now = Instant::now();
		self.entries
			.remove(state)
			.filter(|(_, entry)| !entry.is_expired(now))
			.map(|(_, entry)| entry.login)
	}

	fn complete(&self, state: &State, token: TokenResponse) -> Result<(), NotPending> {
		let now = Instant::now();
		let login = Login::Authenticated(token);
		let expires_at = self.expires_at(now, &login);

		match self.entries.get_mut(state) {
			Some(mut entry) if entry.login.is_pending() && !entry.is_expired(now) => {
				entry.login = login;
				entry.expires_at = expires_at;
				Ok(())
			}
			_ => Err(NotPending),
		}
	}

	fn sweep(&self) -> usize {
		let now = Instant::now();
		let before = self.entries.len();
		self.entries.retain(|_, entry| !entry.is_expired(now));
		let removed = before.saturating_sub(self.entries.len());

		if removed > 0 {
			log::debug!("swept {removed} expired login sessions");
		}

		removed
	}
}

/// Periodically drops the expired sessions of `store`.
pub fn spawn_sweeper(store: Arc<dyn SessionStore>, every: Duration) -> JoinHandle<()> {
	tokio::spawn(async move {
		let period = every.clamp(MIN_SWEEP_INTERVAL, MAX_SWEEP_INTERVAL);
		let mut interval = tokio::time::interval(period);

		loop {
			interval.tick().await;
			store.sweep();
		}
	})
}
