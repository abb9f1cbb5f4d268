//! Synchronous client for the auth server's user API.
//!
//! # Overview
//! `UserClient` creates, fetches and deletes `User` records over HTTPS with
//! JSON bodies. Token, group, policy, resource and challenge operations exist
//! on the client but fail with `ApiError::NotImplemented`.
//!
//! # Design
//! - `UserApi` builds `HttpRequest` values and parses `HttpResponse` values
//!   without touching the network, so the wire contract is testable on its own.
//! - `Transport` performs the round-trip; `UreqTransport` is the blocking
//!   implementation configured from `ClientConfig` (TLS verification toggle,
//!   timeout).
//! - Configuration is an explicit `ClientConfig` value, never global state.
//!
//! ```no_run
//! use auth_client::{ClientConfig, User, UserClient};
//!
//! let client = UserClient::new(&ClientConfig::from_env()?);
//! let mut user = User::new("Joe Schmoe", "j.shmoe@example.org", true);
//! client.create(&mut user)?;
//! client.get(&mut user)?;
//! client.delete(&user)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod user_client;

pub use client::UserApi;
pub use config::{AbsentUser, ClientConfig};
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{NewPerson, User, UserRecord};
pub use user_client::UserClient;
