//! Thread-safe in-memory [`Backend`] implementation for tests and demos.

// self
use crate::{_prelude::*, auth::ScopeSet, backend::{Backend, BackendFuture}, context::GrantContext};

// Re-exported so `backend::memory::{ClientId, ResourceOwnerId}` is a valid
// path for code that only ever talks to the in-memory reference backend.
pub use crate::auth::{ClientId, ResourceOwnerId};

type ContextMap = Arc<RwLock<HashMap<String, GrantContext<InMemoryBackend>>>>;

/// A registered OAuth 2.0 client.
#[derive(Clone, Debug)]
pub struct ClientRecord {
	/// The client's identifier.
	pub id: ClientId,
	/// The client secret, present for confidential clients.
	pub secret: Option<String>,
	/// Registered redirect URIs, checked by exact match.
	pub redirect_uris: Vec<Url>,
	/// The scope this client is entitled to request.
	pub registered_scope: ScopeSet,
}
impl PartialEq for ClientRecord {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

/// A registered resource owner.
#[derive(Clone, Debug)]
pub struct ResourceOwnerRecord {
	/// The resource owner's identifier (their username).
	pub id: ResourceOwnerId,
	/// The resource owner's password, stored in plain text. Reference
	/// implementation only — a production `Backend` must hash credentials.
	pub password: String,
	/// The scope this resource owner is entitled to grant.
	pub registered_scope: ScopeSet,
}

/// Errors raised by [`InMemoryBackend`].
#[derive(Debug, ThisError)]
pub enum MemoryBackendError {
	/// No client is registered under the presented identifier.
	#[error("Unknown client `{client_id}`.")]
	UnknownClient {
		/// The client identifier that was presented.
		client_id: String,
	},
	/// The client secret did not match the registered value.
	#[error("Client secret mismatch for `{client_id}`.")]
	ClientSecretMismatch {
		/// The client identifier that was presented.
		client_id: String,
	},
	/// No resource owner is registered under the presented identifier.
	#[error("Unknown resource owner `{username}`.")]
	UnknownResourceOwner {
		/// The username that was presented.
		username: String,
	},
	/// The resource owner's password did not match.
	#[error("Password mismatch for `{username}`.")]
	PasswordMismatch {
		/// The username that was presented.
		username: String,
	},
	/// The redirect URI is not registered for the client.
	#[error("Redirect URI `{uri}` is not registered for `{client_id}`.")]
	UnregisteredRedirectUri {
		/// The client identifier that was presented.
		client_id: String,
		/// The offending redirect URI.
		uri: String,
	},
	/// The requested scope is not a subset of the registered scope.
	#[error("Requested scope exceeds the registered scope.")]
	ScopeExceedsRegistered,
	/// No context is associated with the presented artifact.
	#[error("Unknown artifact `{artifact}`.")]
	UnknownArtifact {
		/// The code/token that was presented.
		artifact: String,
	},
}

/// A [`Backend`] that keeps clients, resource owners, and issued artifacts
/// in process memory behind [`parking_lot`] locks. Suitable for tests and
/// local demos; every client secret and resource owner password is kept as
/// plain text, which is never appropriate in production.
#[derive(Default)]
pub struct InMemoryBackend {
	clients: Arc<RwLock<HashMap<ClientId, ClientRecord>>>,
	resource_owners: Arc<RwLock<HashMap<ResourceOwnerId, ResourceOwnerRecord>>>,
	access_codes: ContextMap,
	access_tokens: ContextMap,
	refresh_tokens: ContextMap,
}
impl InMemoryBackend {
	/// Registers a client, overwriting any prior registration under the same
	/// identifier.
	pub fn register_client(&self, record: ClientRecord) {
		self.clients.write().insert(record.id.clone(), record);
	}

	/// Registers a resource owner, overwriting any prior registration under
	/// the same identifier.
	pub fn register_resource_owner(&self, record: ResourceOwnerRecord) {
		self.resource_owners.write().insert(record.id.clone(), record);
	}

	/// Inserts an access code association directly, bypassing the
	/// [`Backend`] future — used by [`super::file::FileBackend`] to restore
	/// a snapshot without re-running the async plumbing.
	pub fn associate_access_code_now(&self, code: String, context: GrantContext<Self>) {
		self.access_codes.write().insert(code, context);
	}

	/// Inserts an access token association directly. See
	/// [`Self::associate_access_code_now`].
	pub fn associate_access_token_now(&self, token: String, context: GrantContext<Self>) {
		self.access_tokens.write().insert(token, context);
	}

	/// Inserts a refresh token association directly. See
	/// [`Self::associate_access_code_now`].
	pub fn associate_refresh_token_now(&self, token: String, context: GrantContext<Self>) {
		self.refresh_tokens.write().insert(token, context);
	}

	/// Clones out the current access code table, for snapshotting.
	pub fn access_codes_snapshot(&self) -> HashMap<String, GrantContext<Self>> {
		self.access_codes.read().clone()
	}

	/// Clones out the current access token table, for snapshotting.
	pub fn access_tokens_snapshot(&self) -> HashMap<String, GrantContext<Self>> {
		self.access_tokens.read().clone()
	}

	/// Clones out the current refresh token table, for snapshotting.
	pub fn refresh_tokens_snapshot(&self) -> HashMap<String, GrantContext<Self>> {
		self.refresh_tokens.read().clone()
	}
}
impl Debug for InMemoryBackend {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("InMemoryBackend")
			.field("clients", &self.clients.read().len())
			.field("resource_owners", &self.resource_owners.read().len())
			.finish()
	}
}

fn narrow_scope(
	requested: &ScopeSet,
	registered: &ScopeSet,
) -> std::result::Result<ScopeSet, MemoryBackendError> {
	if requested.is_empty() {
		return Ok(registered.clone());
	}

	let narrowed: Vec<String> =
		requested.iter().filter(|scope| registered.contains(scope)).map(String::from).collect();

	if narrowed.len() != requested.len() {
		return Err(MemoryBackendError::ScopeExceedsRegistered);
	}

	ScopeSet::new(narrowed).map_err(|_| MemoryBackendError::ScopeExceedsRegistered)
}

fn associate(map: ContextMap, key: &str, context: GrantContext<InMemoryBackend>) {
	map.write().insert(key.to_owned(), context);
}

fn resolve(
	map: ContextMap,
	key: &str,
) -> std::result::Result<GrantContext<InMemoryBackend>, MemoryBackendError> {
	map.read()
		.get(key)
		.cloned()
		.ok_or_else(|| MemoryBackendError::UnknownArtifact { artifact: key.to_owned() })
}

fn revoke(map: ContextMap, key: &str) -> std::result::Result<(), MemoryBackendError> {
	map.write()
		.remove(key)
		.map(|_| ())
		.ok_or_else(|| MemoryBackendError::UnknownArtifact { artifact: key.to_owned() })
}

impl Backend for InMemoryBackend {
	type AppCtx = ();
	type Client = ClientRecord;
	type Error = MemoryBackendError;
	type ResourceOwner = ResourceOwnerRecord;
	type Scope = ScopeSet;

	fn authenticate_username_password<'a>(
		&'a self,
		username: &'a str,
		password: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::ResourceOwner, Self> {
		Box::pin(async move {
			let owners = self.resource_owners.read();
			let record = owners.get(username).ok_or_else(|| {
				MemoryBackendError::UnknownResourceOwner { username: username.to_owned() }
			})?;

			if record.password != password {
				return Err(MemoryBackendError::PasswordMismatch { username: username.to_owned() });
			}

			Ok((ctx, record.clone()))
		})
	}

	fn authenticate_client<'a>(
		&'a self,
		client_id: &'a str,
		client_secret: Option<&'a str>,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::Client, Self> {
		Box::pin(async move {
			let clients = self.clients.read();
			let record = clients
				.get(client_id)
				.ok_or_else(|| MemoryBackendError::UnknownClient { client_id: client_id.to_owned() })?;

			match (record.secret.as_deref(), client_secret) {
				(None, _) => {},
				(Some(expected), Some(presented)) if expected == presented => {},
				_ => {
					return Err(MemoryBackendError::ClientSecretMismatch {
						client_id: client_id.to_owned(),
					});
				},
			}

			Ok((ctx, record.clone()))
		})
	}

	fn get_client_identity<'a>(
		&'a self,
		client_id: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::Client, Self> {
		Box::pin(async move {
			let clients = self.clients.read();
			let record = clients
				.get(client_id)
				.ok_or_else(|| MemoryBackendError::UnknownClient { client_id: client_id.to_owned() })?;

			Ok((ctx, record.clone()))
		})
	}

	fn verify_redirection_uri<'a>(
		&'a self,
		client: &'a Self::Client,
		uri: &'a Url,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self> {
		Box::pin(async move {
			if client.redirect_uris.iter().any(|registered| registered == uri) {
				Ok((ctx, ()))
			} else {
				Err(MemoryBackendError::UnregisteredRedirectUri {
					client_id: client.id.to_string(),
					uri: uri.to_string(),
				})
			}
		})
	}

	fn verify_resowner_scope<'a>(
		&'a self,
		resource_owner: &'a Self::ResourceOwner,
		requested_scope: &'a Self::Scope,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::Scope, Self> {
		Box::pin(async move {
			let effective = narrow_scope(requested_scope, &resource_owner.registered_scope)?;

			Ok((ctx, effective))
		})
	}

	fn verify_client_scope<'a>(
		&'a self,
		client: &'a Self::Client,
		requested_scope: &'a Self::Scope,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::Scope, Self> {
		Box::pin(async move {
			let effective = narrow_scope(requested_scope, &client.registered_scope)?;

			Ok((ctx, effective))
		})
	}

	fn verify_scope<'a>(
		&'a self,
		registered_scope: &'a Self::Scope,
		requested_scope: &'a Self::Scope,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::Scope, Self> {
		Box::pin(async move {
			let effective = narrow_scope(requested_scope, registered_scope)?;

			Ok((ctx, effective))
		})
	}

	fn associate_access_code<'a>(
		&'a self,
		code: &'a str,
		context: GrantContext<Self>,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self> {
		let map = self.access_codes.clone();

		Box::pin(async move {
			associate(map, code, context);

			Ok((ctx, ()))
		})
	}

	fn associate_access_token<'a>(
		&'a self,
		token: &'a str,
		context: GrantContext<Self>,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self> {
		let map = self.access_tokens.clone();

		Box::pin(async move {
			associate(map, token, context);

			Ok((ctx, ()))
		})
	}

	fn associate_refresh_token<'a>(
		&'a self,
		token: &'a str,
		context: GrantContext<Self>,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self> {
		let map = self.refresh_tokens.clone();

		Box::pin(async move {
			associate(map, token, context);

			Ok((ctx, ()))
		})
	}

	fn resolve_access_code<'a>(
		&'a self,
		code: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, GrantContext<Self>, Self> {
		let map = self.access_codes.clone();
		let code = code.to_owned();

		Box::pin(async move { resolve(map, &code).map(|context| (ctx, context)) })
	}

	fn resolve_access_token<'a>(
		&'a self,
		token: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, GrantContext<Self>, Self> {
		let map = self.access_tokens.clone();
		let token = token.to_owned();

		Box::pin(async move { resolve(map, &token).map(|context| (ctx, context)) })
	}

	fn resolve_refresh_token<'a>(
		&'a self,
		token: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, GrantContext<Self>, Self> {
		let map = self.refresh_tokens.clone();
		let token = token.to_owned();

		Box::pin(async move { resolve(map, &token).map(|context| (ctx, context)) })
	}

	fn revoke_access_code<'a>(
		&'a self,
		code: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self> {
		let map = self.access_codes.clone();
		let code = code.to_owned();

		Box::pin(async move { revoke(map, &code).map(|()| (ctx, ())) })
	}

	fn revoke_access_token<'a>(
		&'a self,
		token: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self> {
		let map = self.access_tokens.clone();
		let token = token.to_owned();

		Box::pin(async move { revoke(map, &token).map(|()| (ctx, ())) })
	}

	fn revoke_refresh_token<'a>(
		&'a self,
		token: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self> {
		let map = self.refresh_tokens.clone();
		let token = token.to_owned();

		Box::pin(async move { revoke(map, &token).map(|()| (ctx, ())) })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn backend_with_client_and_owner() -> InMemoryBackend {
		let backend = InMemoryBackend::default();

		backend.register_client(ClientRecord {
			id: ClientId::new("client-1").expect("Client fixture should be valid."),
			secret: Some("secret".into()),
			redirect_uris: vec![Url::parse("https://example.com/cb").expect("URI should parse.")],
			registered_scope: ScopeSet::new(["read", "write"]).expect("Scope should be valid."),
		});
		backend.register_resource_owner(ResourceOwnerRecord {
			id: ResourceOwnerId::new("alice").expect("Resource owner fixture should be valid."),
			password: "pw".into(),
			registered_scope: ScopeSet::new(["read"]).expect("Scope should be valid."),
		});

		backend
	}

	#[tokio::test]
	async fn authenticate_username_password_rejects_bad_password() {
		let backend = backend_with_client_and_owner();
		let err = backend
			.authenticate_username_password("alice", "wrong", ())
			.await
			.expect_err("Bad password should be rejected.");

		assert!(matches!(err, MemoryBackendError::PasswordMismatch { .. }));
	}

	#[tokio::test]
	async fn verify_resowner_scope_narrows_to_registered() {
		let backend = backend_with_client_and_owner();
		let owner = backend.resource_owners.read().get("alice").cloned().expect("Fixture present.");
		let requested = ScopeSet::default();
		let (_, effective) = backend
			.verify_resowner_scope(&owner, &requested, ())
			.await
			.expect("Empty request should return the full registered scope.");

		assert_eq!(effective.normalized(), "read");
	}

	#[tokio::test]
	async fn verify_client_scope_rejects_scope_not_registered() {
		let backend = backend_with_client_and_owner();
		let client = backend.clients.read().get("client-1").cloned().expect("Fixture present.");
		let requested = ScopeSet::new(["admin"]).expect("Scope fixture should be valid.");
		let err = backend
			.verify_client_scope(&client, &requested, ())
			.await
			.expect_err("Unregistered scope should be rejected.");

		assert!(matches!(err, MemoryBackendError::ScopeExceedsRegistered));
	}

	#[tokio::test]
	async fn access_code_round_trips_through_associate_resolve_revoke() {
		let backend = backend_with_client_and_owner();
		let scope = ScopeSet::new(["read"]).expect("Scope fixture should be valid.");
		let context =
			GrantContext::new(None, None, OffsetDateTime::now_utc() + Duration::minutes(1), scope);

		backend
			.associate_access_code("code-1", context, ())
			.await
			.expect("Association should succeed.");
		backend.resolve_access_code("code-1", ()).await.expect("Resolution should succeed.");
		backend.revoke_access_code("code-1", ()).await.expect("Revocation should succeed.");

		let err = backend
			.resolve_access_code("code-1", ())
			.await
			.expect_err("Revoked code should no longer resolve.");

		assert!(matches!(err, MemoryBackendError::UnknownArtifact { .. }));
	}
}
