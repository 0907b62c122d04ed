//! The persistence and identity collaborator every [`crate::engine::Engine`] is generic over.

pub mod file;
pub mod memory;

// self
use crate::{_prelude::*, context::GrantContext};

/// Future returned by every [`Backend`] method: resolves to the next
/// `AppCtx` to thread into the following call, paired with the step's
/// success value, or to the Backend's own opaque error.
pub type BackendFuture<'a, T, B> =
	Pin<Box<dyn Future<Output = std::result::Result<(<B as Backend>::AppCtx, T), <B as Backend>::Error>> + Send + 'a>>;

/// The persistence + identity store an [`crate::engine::Engine`] is generic
/// over. Owns identity verification, scope policy, and artifact persistence;
/// the engine never caches anything it returns and never inspects the inner
/// detail of [`Backend::Error`] — each call site maps a failure to exactly
/// one [`crate::error::Error`] variant per the fixed table the engine's flow
/// operations document.
///
/// Every method threads `AppCtx` linearly: it is consumed by value and the
/// next `AppCtx` to use is handed back inside the success value. This is the
/// same threaded-state idiom the Rust type system enforces for free — a
/// caller cannot reuse a moved `AppCtx`, so the linear ordering the
/// underlying RFC flow requires is a compile error to violate, not merely a
/// runtime property to test for.
pub trait Backend: Send + Sync + 'static {
	/// Opaque client identity, compared for equality by the engine.
	type Client: Clone + PartialEq + Send + Sync + 'static;
	/// Opaque resource owner identity.
	type ResourceOwner: Clone + Send + Sync + 'static;
	/// Opaque scope value; may be an ordered token sequence or an opaque
	/// binary blob. The engine never parses it.
	type Scope: Clone + Send + Sync + 'static;
	/// Caller-owned application context threaded through every call.
	type AppCtx: Send + 'static;
	/// Backend-specific failure detail. Never forwarded verbatim to an
	/// engine caller — every call site maps it to an [`crate::error::Error`].
	type Error: std::error::Error + Send + Sync + 'static;

	/// Authenticates a resource owner by username and password.
	fn authenticate_username_password<'a>(
		&'a self,
		username: &'a str,
		password: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::ResourceOwner, Self>;

	/// Authenticates a client by id and optional secret.
	fn authenticate_client<'a>(
		&'a self,
		client_id: &'a str,
		client_secret: Option<&'a str>,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::Client, Self>;

	/// Resolves a client's identity without authenticating a secret, used at
	/// the authorization endpoint where only the `client_id` is presented.
	fn get_client_identity<'a>(
		&'a self,
		client_id: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::Client, Self>;

	/// Verifies that `uri` is a registered redirect URI for `client`.
	fn verify_redirection_uri<'a>(
		&'a self,
		client: &'a Self::Client,
		uri: &'a Url,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self>;

	/// Verifies `requested_scope` against the resource owner's policy,
	/// returning the effective (possibly narrowed) scope to persist.
	fn verify_resowner_scope<'a>(
		&'a self,
		resource_owner: &'a Self::ResourceOwner,
		requested_scope: &'a Self::Scope,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::Scope, Self>;

	/// Verifies `requested_scope` against the client's policy, returning the
	/// effective scope to persist.
	fn verify_client_scope<'a>(
		&'a self,
		client: &'a Self::Client,
		requested_scope: &'a Self::Scope,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::Scope, Self>;

	/// Verifies `requested_scope` is not broader than `registered_scope`,
	/// returning the effective scope (used during refresh).
	fn verify_scope<'a>(
		&'a self,
		registered_scope: &'a Self::Scope,
		requested_scope: &'a Self::Scope,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::Scope, Self>;

	/// Persists `context` under `code`.
	fn associate_access_code<'a>(
		&'a self,
		code: &'a str,
		context: GrantContext<Self>,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self>;

	/// Persists `context` under `token`.
	fn associate_access_token<'a>(
		&'a self,
		token: &'a str,
		context: GrantContext<Self>,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self>;

	/// Persists `context` under `token`.
	fn associate_refresh_token<'a>(
		&'a self,
		token: &'a str,
		context: GrantContext<Self>,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self>;

	/// Resolves the context previously associated with `code`.
	fn resolve_access_code<'a>(
		&'a self,
		code: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, GrantContext<Self>, Self>;

	/// Resolves the context previously associated with `token`.
	fn resolve_access_token<'a>(
		&'a self,
		token: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, GrantContext<Self>, Self>;

	/// Resolves the context previously associated with `token`.
	fn resolve_refresh_token<'a>(
		&'a self,
		token: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, GrantContext<Self>, Self>;

	/// Revokes the access code, preventing any further resolution.
	fn revoke_access_code<'a>(
		&'a self,
		code: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self>;

	/// Revokes the access token, preventing any further resolution.
	fn revoke_access_token<'a>(
		&'a self,
		token: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self>;

	/// Revokes the refresh token, preventing any further resolution.
	fn revoke_refresh_token<'a>(
		&'a self,
		token: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self>;
}
