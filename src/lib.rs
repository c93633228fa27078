//! Reddit login front-end built on the [OAuth 2.0 Authorization
//! Framework][rfc6749].
//!
//! A user reaching the landing page is sent to Reddit with a fresh
//! anti-forgery state token. Reddit redirects back with an authorization
//! code, which is exchanged for a bearer token at the token endpoint and kept
//! in memory for the lifetime of the login.
//!
//! # Modules
//!
//! - [`client`] — Client credentials and transport error types.
//! - [`endpoints`] — Authorization and token endpoints.
//! - [`login`] — The login flow tying the endpoints to the session store.
//! - [`session`] — In-memory login sessions keyed by state.
//! - [`transport`] — HTTP transport layer and content type encoding.
//! - [`web`] — `axum` HTML front-end.
//! - [`config`] — Command line and environment configuration.
//! - [`util`] — URI query string utilities.
//!
//! Core OAuth 2.0 types ([`AccessToken`], [`ClientId`], [`Code`], [`Scope`],
//! [`State`]) are re-exported at the crate root.
//!
//! [rfc6749]: https://datatracker.ietf.org/doc/html/rfc6749
#[cfg(feature = "reqwest")]
pub use reqwest;

pub use http;

pub mod client;
pub mod config;
pub mod endpoints;
pub mod login;
pub mod session;
pub mod transport;
mod types;
pub mod util;
pub mod web;

pub use types::*;
