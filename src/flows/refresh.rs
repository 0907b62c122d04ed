//! Refresh Token flow: mints a fresh access token from a still-valid refresh
//! token. Never mints a new refresh token of its own.

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
	/// Authenticates the client, resolves and re-validates the refresh
	/// token, narrows `requested_scope` against the token's originally
	/// registered scope, and delegates to `issue_token` — the lifetime used
	/// is the `password_credentials` lifetime, not the lifetime recovered
	/// from the original grant.
	pub async fn refresh_access_token(
		&self,
		client_id: &str,
		client_secret: Option<&str>,
		refresh_token: &str,
		requested_scope: &B::Scope,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, S::Response)> {
		instrumented(FlowKind::Refresh, "refresh_access_token", async move {
			let (ctx, client) = self
				.backend()
				.authenticate_client(client_id, client_secret, ctx)
				.await
				.map_err(|e| Error::invalid_client(e.to_string()))?;
			let (ctx, context) = self
				.backend()
				.resolve_refresh_token(refresh_token, ctx)
				.await
				.map_err(|e| Error::invalid_grant(e.to_string()))?;

			if context.is_expired(self.now()) {
				let _ = self.backend().revoke_refresh_token(refresh_token, ctx).await;

				return Err(Error::invalid_grant("refresh token has expired"));
			}

			match &context.client {
				Some(bound) if *bound == client => {},
				_ => return Err(Error::invalid_grant("refresh token was not issued to this client")),
			}

			let (ctx, verified_scope) = self
				.backend()
				.verify_scope(&context.scope, requested_scope, ctx)
				.await
				.map_err(|e| Error::invalid_scope(e.to_string()))?;
			let ttl = self.config().expiry_time(GrantKind::PasswordCredentials);
			let authorization =
				Authorization::new(Some(client), context.resource_owner, verified_scope, ttl);

			self.issue_token_core(authorization, ctx).await
		})
		.await
	}
}
