//! Authorization Code grant: the authorization endpoint that issues a code,
//! and the token endpoint that exchanges one.

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
	/// Authorization endpoint step: resolves the client, checks its redirect
	/// URI, authenticates the resource owner, and narrows the requested
	/// scope. Unlike every other flow, a bad redirect URI here maps to
	/// `unauthorized_client` rather than `invalid_grant` — the RFC draws
	/// this distinction at the authorization endpoint specifically.
	pub async fn authorize_code_request(
		&self,
		client_id: &str,
		redirect_uri: &Url,
		username: &str,
		password: &str,
		requested_scope: &B::Scope,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, Authorization<B>)> {
		instrumented(FlowKind::CodeRequest, "authorize_code_request", async move {
			let (ctx, client) = self
				.backend()
				.get_client_identity(client_id, ctx)
				.await
				.map_err(|e| Error::unauthorized_client(e.to_string()))?;
			let (ctx, ()) = self
				.backend()
				.verify_redirection_uri(&client, redirect_uri, ctx)
				.await
				.map_err(|e| Error::unauthorized_client(e.to_string()))?;
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
			let ttl = self.config().expiry_time(GrantKind::CodeGrant);

			Ok((ctx, Authorization::new(Some(client), Some(resource_owner), scope, ttl)))
		})
		.await
	}

	/// Token endpoint step: authenticates the client, re-checks the redirect
	/// URI, resolves the access code bound to this client, and revokes it —
	/// codes are single-use. The resulting [`Authorization`] carries the
	/// `resource_owner`/`scope` bound to the code, with the `password_credentials`
	/// lifetime (not the code's own lifetime).
	pub async fn authorize_code_grant(
		&self,
		client_id: &str,
		client_secret: Option<&str>,
		code: &str,
		redirect_uri: &Url,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, Authorization<B>)> {
		instrumented(FlowKind::CodeGrant, "authorize_code_grant", async move {
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
			let (ctx, context) = self.verify_access_code_for_client(code, &client, ctx).await?;
			let (ctx, ()) = self
				.backend()
				.revoke_access_code(code, ctx)
				.await
				.map_err(|e| Error::server_error(e.to_string()))?;
			let ttl = self.config().expiry_time(GrantKind::PasswordCredentials);

			Ok((ctx, Authorization::new(Some(client), context.resource_owner, context.scope, ttl)))
		})
		.await
	}
}
