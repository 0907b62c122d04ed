//! A pluggable OAuth 2.0 (RFC 6749) authorization engine — password, client
//! credentials, authorization code, implicit, and refresh grants threaded
//! through your own storage and identity backend.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod authorization;
pub mod backend;
pub mod clock;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod flows;
pub mod obs;
pub mod response;
pub mod token_generator;

#[cfg(any(test, feature = "test"))]
pub mod _prelude_test {
	//! Convenience re-exports and fixtures for integration tests; enabled via
	//! `cfg(test)` or the `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::ScopeSet,
		backend::memory::{ClientId, ClientRecord, InMemoryBackend, ResourceOwnerId, ResourceOwnerRecord},
		config::StaticConfig,
		engine::Engine,
		response::DefaultResponseShaper,
		token_generator::DeterministicTokenGenerator,
	};

	/// Engine specialization wired to the in-memory reference backend, a
	/// deterministic token generator, and the identity response shaper —
	/// exactly what every integration test needs and nothing more.
	pub type TestEngine =
		Engine<InMemoryBackend, DeterministicTokenGenerator, DefaultResponseShaper<InMemoryBackend>>;

	/// Builds a [`TestEngine`] with the provided grant lifetimes (in seconds).
	pub fn test_engine(
		password_credentials_secs: i64,
		client_credentials_secs: i64,
		code_grant_secs: i64,
	) -> (TestEngine, Arc<InMemoryBackend>) {
		let backend = Arc::new(InMemoryBackend::default());
		let config = StaticConfig::builder()
			.password_credentials(Duration::seconds(password_credentials_secs))
			.client_credentials(Duration::seconds(client_credentials_secs))
			.code_grant(Duration::seconds(code_grant_secs))
			.build()
			.expect("Failed to build fixture configuration for test engine.");
		let engine = Engine::new(
			backend.clone(),
			DeterministicTokenGenerator::default(),
			DefaultResponseShaper::default(),
			config,
		);

		(engine, backend)
	}

	/// Shorthand for constructing a valid [`ClientId`] fixture.
	pub fn client_id(value: &str) -> ClientId {
		ClientId::new(value).expect("Client identifier fixture should be valid.")
	}

	/// Shorthand for constructing a valid [`ResourceOwnerId`] fixture.
	pub fn resource_owner_id(value: &str) -> ResourceOwnerId {
		ResourceOwnerId::new(value).expect("Resource owner identifier fixture should be valid.")
	}

	/// Builds a minimal public-client [`ClientRecord`] fixture, entitled to
	/// the full `"read write"` scope and no registered redirect URIs.
	pub fn client_record(id: &str) -> ClientRecord {
		ClientRecord {
			id: client_id(id),
			secret: None,
			redirect_uris: Vec::new(),
			registered_scope: ScopeSet::new(["read", "write"])
				.expect("Scope fixture should be valid."),
		}
	}

	/// Builds a minimal [`ResourceOwnerRecord`] fixture entitled to the
	/// `"read write"` scope.
	pub fn resource_owner_record(id: &str) -> ResourceOwnerRecord {
		ResourceOwnerRecord {
			id: resource_owner_id(id),
			password: "password".into(),
			registered_scope: ScopeSet::new(["read", "write"])
				.expect("Scope fixture should be valid."),
		}
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
