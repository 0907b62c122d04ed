//! Resource Owner Password Credentials grant, in its public-client,
//! confidential-client, and implicit-grant (redirect URI) variants, plus the
//! pre-authenticated `authorize_resource_owner` shortcut.

// self
use crate::{
	_prelude::*,
	authorization::Authorization,
	backend::Backend,
	config::GrantKind,
	engine::Engine,
	error::Error,
	flows::common::instrumented,
	obs::FlowKind,
	response::ResponseShaper,
	token_generator::TokenGenerator,
};

impl<B, T, S> Engine<B, T, S>
where
	B: Backend,
	T: TokenGenerator<B>,
	S: ResponseShaper<B>,
{
	/// Authenticates `username`/`password` and narrows `requested_scope` to
	/// what the resource owner is entitled to grant. On success the returned
	/// [`Authorization`] carries no `client`.
	pub async fn authorize_password(
		&self,
		username: &str,
		password: &str,
		requested_scope: &B::Scope,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, Authorization<B>)> {
		instrumented(
			FlowKind::Password,
			"authorize_password",
			self.authorize_password_core(username, password, requested_scope, ctx),
		)
		.await
	}

	/// Confidential-client variant: authenticates the client first, then
	/// runs the same steps as [`Self::authorize_password`] and attaches the
	/// client to the result.
	pub async fn authorize_password_confidential(
		&self,
		client_id: &str,
		client_secret: &str,
		username: &str,
		password: &str,
		requested_scope: &B::Scope,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, Authorization<B>)> {
		instrumented(FlowKind::PasswordConfidential, "authorize_password_confidential", async move {
			let (ctx, client) = self
				.backend()
				.authenticate_client(client_id, Some(client_secret), ctx)
				.await
				.map_err(|e| Error::invalid_client(e.to_string()))?;
			let (ctx, authorization) =
				self.authorize_password_core(username, password, requested_scope, ctx).await?;

			Ok((ctx, authorization.with_client(client)))
		})
		.await
	}

	/// Implicit-grant variant: authenticates the client, verifies the
	/// redirect URI, then runs the same steps as [`Self::authorize_password`]
	/// and attaches the client to the result.
	pub async fn authorize_password_implicit(
		&self,
		client_id: &str,
		client_secret: Option<&str>,
		redirect_uri: &Url,
		username: &str,
		password: &str,
		requested_scope: &B::Scope,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, Authorization<B>)> {
		instrumented(FlowKind::PasswordImplicit, "authorize_password_implicit", async move {
			let (ctx, client) = self
				.backend()
				.authenticate_client(client_id, client_secret, ctx)
				.await
				.map_err(|e| Error::invalid_client(e.to_string()))?;
			let (ctx, ()) = self
				.backend()
				.verify_redirection_uri(&client, redirect_uri, ctx)
				.await
				.map_err(|e| Error::invalid_grant(e.to_string()))?;
			let (ctx, authorization) =
				self.authorize_password_core(username, password, requested_scope, ctx).await?;

			Ok((ctx, authorization.with_client(client)))
		})
		.await
	}

	/// For a caller that has already authenticated a resource owner through
	/// some other means: verifies `requested_scope` only.
	pub async fn authorize_resource_owner(
		&self,
		resource_owner: B::ResourceOwner,
		requested_scope: &B::Scope,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, Authorization<B>)> {
		instrumented(FlowKind::ResourceOwner, "authorize_resource_owner", async move {
			let (ctx, scope) = self
				.backend()
				.verify_resowner_scope(&resource_owner, requested_scope, ctx)
				.await
				.map_err(|e| Error::invalid_scope(e.to_string()))?;
			let ttl = self.config().expiry_time(GrantKind::PasswordCredentials);

			Ok((ctx, Authorization::new(None, Some(resource_owner), scope, ttl)))
		})
		.await
	}

	async fn authorize_password_core(
		&self,
		username: &str,
		password: &str,
		requested_scope: &B::Scope,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, Authorization<B>)> {
		let (ctx, resource_owner) = self
			.backend()
			.authenticate_username_password(username, password, ctx)
			.await
			.map_err(|e| Error::access_denied(e.to_string()))?;
		let (ctx, scope) = self
			.backend()
			.verify_resowner_scope(&resource_owner, requested_scope, ctx)
			.await
			.map_err(|e| Error::invalid_scope(e.to_string()))?;
		let ttl = self.config().expiry_time(GrantKind::PasswordCredentials);

		Ok((ctx, Authorization::new(None, Some(resource_owner), scope, ttl)))
	}
}

#[cfg(test)]
mod tests {
	// self
	use crate::{_prelude_test::*, auth::ScopeSet};

	#[tokio::test]
	async fn authorize_password_narrows_scope_and_carries_no_client() {
		let (engine, backend) = test_engine(3_600, 3_600, 600);

		backend.register_resource_owner(resource_owner_record("alice"));

		let requested = ScopeSet::new(["read"]).expect("Scope fixture should be valid.");
		let (_, authorization) = engine
			.authorize_password("alice", "password", &requested, ())
			.await
			.expect("Password grant should succeed.");

		assert!(authorization.client.is_none());
		assert_eq!(
			authorization.resource_owner.expect("Resource owner should be set.").id,
			resource_owner_id("alice")
		);
		assert_eq!(authorization.scope.normalized(), "read");
	}

	#[tokio::test]
	async fn authorize_password_rejects_bad_password() {
		let (engine, backend) = test_engine(3_600, 3_600, 600);

		backend.register_resource_owner(resource_owner_record("alice"));

		let requested = ScopeSet::default();
		let err = engine
			.authorize_password("alice", "wrong", &requested, ())
			.await
			.expect_err("Bad password should be rejected.");

		assert!(matches!(err, Error::AccessDenied { .. }));
	}
}
