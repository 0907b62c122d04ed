//! A fully-scriptable mock [`Backend`] for asserting step ordering, AppCtx
//! threading, and the per-step error mapping table directly, independent of
//! the in-memory reference implementation.

// std
use std::sync::Arc;
// crates.io
use oauth2_engine::{
	backend::{Backend, BackendFuture},
	context::GrantContext,
};
use parking_lot::Mutex;
use thiserror::Error;
use time::OffsetDateTime;
use url::Url;

/// Opaque client identity used by [`MockBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockClient(pub String);

/// Opaque resource owner identity used by [`MockBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockOwner(pub String);

/// Opaque scope value used by [`MockBackend`]: an ordered sequence of tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockScope(pub Vec<String>);

/// The sole error [`MockBackend`] ever raises; the engine maps it per-step,
/// never inspecting its payload.
#[derive(Debug, Error)]
#[error("mock backend failure: {0}")]
pub struct MockError(pub String);

type StepResult<T> = Result<T, String>;

/// A scriptable [`Backend`]: every method consumes a pre-loaded canned
/// result (panicking if none was configured for that call), tags the AppCtx
/// with a monotonically increasing counter, and appends its name to
/// [`MockBackend::calls`] so tests can assert both ordering and content.
#[derive(Default)]
pub struct MockBackend {
	pub calls: Mutex<Vec<&'static str>>,
	pub authenticate_username_password_result: Mutex<Option<StepResult<MockOwner>>>,
	pub authenticate_client_result: Mutex<Option<StepResult<MockClient>>>,
	pub get_client_identity_result: Mutex<Option<StepResult<MockClient>>>,
	pub verify_redirection_uri_result: Mutex<Option<StepResult<()>>>,
	pub verify_resowner_scope_result: Mutex<Option<StepResult<MockScope>>>,
	pub verify_client_scope_result: Mutex<Option<StepResult<MockScope>>>,
	pub verify_scope_result: Mutex<Option<StepResult<MockScope>>>,
	pub resolve_access_code_result: Mutex<Option<StepResult<GrantContext<MockBackend>>>>,
	pub resolve_access_token_result: Mutex<Option<StepResult<GrantContext<MockBackend>>>>,
	pub resolve_refresh_token_result: Mutex<Option<StepResult<GrantContext<MockBackend>>>>,
	pub revoke_access_code_calls: Mutex<u32>,
	pub revoke_access_token_calls: Mutex<u32>,
	pub revoke_refresh_token_calls: Mutex<u32>,
	pub associate_access_code_calls: Mutex<Vec<(String, GrantContext<MockBackend>)>>,
	pub associate_access_token_calls: Mutex<Vec<(String, GrantContext<MockBackend>)>>,
	pub associate_refresh_token_calls: Mutex<Vec<(String, GrantContext<MockBackend>)>>,
}
impl MockBackend {
	/// Builds an `Arc<MockBackend>` with every canned result defaulted to
	/// `None`; tests configure only the steps they exercise.
	pub fn shared() -> Arc<Self> {
		Arc::new(Self::default())
	}

	fn take<T>(slot: &Mutex<Option<StepResult<T>>>, step: &'static str) -> StepResult<T> {
		slot.lock().take().unwrap_or_else(|| Err(format!("no canned result configured for {step}")))
	}
}

impl Backend for MockBackend {
	type AppCtx = u64;
	type Client = MockClient;
	type Error = MockError;
	type ResourceOwner = MockOwner;
	type Scope = MockScope;

	fn authenticate_username_password<'a>(
		&'a self,
		_username: &'a str,
		_password: &'a str,
		ctx: u64,
	) -> BackendFuture<'a, MockOwner, Self> {
		Box::pin(async move {
			self.calls.lock().push("authenticate_username_password");

			Self::take(&self.authenticate_username_password_result, "authenticate_username_password")
				.map(|owner| (ctx + 1, owner))
				.map_err(MockError)
		})
	}

	fn authenticate_client<'a>(
		&'a self,
		_client_id: &'a str,
		_client_secret: Option<&'a str>,
		ctx: u64,
	) -> BackendFuture<'a, MockClient, Self> {
		Box::pin(async move {
			self.calls.lock().push("authenticate_client");

			Self::take(&self.authenticate_client_result, "authenticate_client")
				.map(|client| (ctx + 1, client))
				.map_err(MockError)
		})
	}

	fn get_client_identity<'a>(
		&'a self,
		_client_id: &'a str,
		ctx: u64,
	) -> BackendFuture<'a, MockClient, Self> {
		Box::pin(async move {
			self.calls.lock().push("get_client_identity");

			Self::take(&self.get_client_identity_result, "get_client_identity")
				.map(|client| (ctx + 1, client))
				.map_err(MockError)
		})
	}

	fn verify_redirection_uri<'a>(
		&'a self,
		_client: &'a MockClient,
		_uri: &'a Url,
		ctx: u64,
	) -> BackendFuture<'a, (), Self> {
		Box::pin(async move {
			self.calls.lock().push("verify_redirection_uri");

			Self::take(&self.verify_redirection_uri_result, "verify_redirection_uri")
				.map(|()| (ctx + 1, ()))
				.map_err(MockError)
		})
	}

	fn verify_resowner_scope<'a>(
		&'a self,
		_resource_owner: &'a MockOwner,
		_requested_scope: &'a MockScope,
		ctx: u64,
	) -> BackendFuture<'a, MockScope, Self> {
		Box::pin(async move {
			self.calls.lock().push("verify_resowner_scope");

			Self::take(&self.verify_resowner_scope_result, "verify_resowner_scope")
				.map(|scope| (ctx + 1, scope))
				.map_err(MockError)
		})
	}

	fn verify_client_scope<'a>(
		&'a self,
		_client: &'a MockClient,
		_requested_scope: &'a MockScope,
		ctx: u64,
	) -> BackendFuture<'a, MockScope, Self> {
		Box::pin(async move {
			self.calls.lock().push("verify_client_scope");

			Self::take(&self.verify_client_scope_result, "verify_client_scope")
				.map(|scope| (ctx + 1, scope))
				.map_err(MockError)
		})
	}

	fn verify_scope<'a>(
		&'a self,
		_registered_scope: &'a MockScope,
		_requested_scope: &'a MockScope,
		ctx: u64,
	) -> BackendFuture<'a, MockScope, Self> {
		Box::pin(async move {
			self.calls.lock().push("verify_scope");

			Self::take(&self.verify_scope_result, "verify_scope")
				.map(|scope| (ctx + 1, scope))
				.map_err(MockError)
		})
	}

	fn associate_access_code<'a>(
		&'a self,
		code: &'a str,
		context: GrantContext<Self>,
		ctx: u64,
	) -> BackendFuture<'a, (), Self> {
		Box::pin(async move {
			self.calls.lock().push("associate_access_code");
			self.associate_access_code_calls.lock().push((code.to_owned(), context));

			Ok((ctx + 1, ()))
		})
	}

	fn associate_access_token<'a>(
		&'a self,
		token: &'a str,
		context: GrantContext<Self>,
		ctx: u64,
	) -> BackendFuture<'a, (), Self> {
		Box::pin(async move {
			self.calls.lock().push("associate_access_token");
			self.associate_access_token_calls.lock().push((token.to_owned(), context));

			Ok((ctx + 1, ()))
		})
	}

	fn associate_refresh_token<'a>(
		&'a self,
		token: &'a str,
		context: GrantContext<Self>,
		ctx: u64,
	) -> BackendFuture<'a, (), Self> {
		Box::pin(async move {
			self.calls.lock().push("associate_refresh_token");
			self.associate_refresh_token_calls.lock().push((token.to_owned(), context));

			Ok((ctx + 1, ()))
		})
	}

	fn resolve_access_code<'a>(
		&'a self,
		_code: &'a str,
		ctx: u64,
	) -> BackendFuture<'a, GrantContext<Self>, Self> {
		Box::pin(async move {
			self.calls.lock().push("resolve_access_code");

			Self::take(&self.resolve_access_code_result, "resolve_access_code")
				.map(|context| (ctx + 1, context))
				.map_err(MockError)
		})
	}

	fn resolve_access_token<'a>(
		&'a self,
		_token: &'a str,
		ctx: u64,
	) -> BackendFuture<'a, GrantContext<Self>, Self> {
		Box::pin(async move {
			self.calls.lock().push("resolve_access_token");

			Self::take(&self.resolve_access_token_result, "resolve_access_token")
				.map(|context| (ctx + 1, context))
				.map_err(MockError)
		})
	}

	fn resolve_refresh_token<'a>(
		&'a self,
		_token: &'a str,
		ctx: u64,
	) -> BackendFuture<'a, GrantContext<Self>, Self> {
		Box::pin(async move {
			self.calls.lock().push("resolve_refresh_token");

			Self::take(&self.resolve_refresh_token_result, "resolve_refresh_token")
				.map(|context| (ctx + 1, context))
				.map_err(MockError)
		})
	}

	fn revoke_access_code<'a>(&'a self, _code: &'a str, ctx: u64) -> BackendFuture<'a, (), Self> {
		Box::pin(async move {
			self.calls.lock().push("revoke_access_code");
			*self.revoke_access_code_calls.lock() += 1;

			Ok((ctx + 1, ()))
		})
	}

	fn revoke_access_token<'a>(&'a self, _token: &'a str, ctx: u64) -> BackendFuture<'a, (), Self> {
		Box::pin(async move {
			self.calls.lock().push("revoke_access_token");
			*self.revoke_access_token_calls.lock() += 1;

			Ok((ctx + 1, ()))
		})
	}

	fn revoke_refresh_token<'a>(&'a self, _token: &'a str, ctx: u64) -> BackendFuture<'a, (), Self> {
		Box::pin(async move {
			self.calls.lock().push("revoke_refresh_token");
			*self.revoke_refresh_token_calls.lock() += 1;

			Ok((ctx + 1, ()))
		})
	}
}

/// Builds a fixture [`GrantContext`] with the given fields, absolute expiry
/// `now + ttl_secs`.
pub fn grant_context(
	client: Option<MockClient>,
	resource_owner: Option<MockOwner>,
	ttl_secs: i64,
	scope: Vec<&str>,
) -> GrantContext<MockBackend> {
	GrantContext::new(
		client,
		resource_owner,
		OffsetDateTime::now_utc() + time::Duration::seconds(ttl_secs),
		MockScope(scope.into_iter().map(String::from).collect()),
	)
}
