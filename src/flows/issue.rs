//! Issuance: turns a consumed [`Authorization`] into a persisted
//! [`GrantContext`] plus a minted artifact and a shaped response.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	authorization::Authorization,
	backend::Backend,
	engine::Engine,
	error::Error,
	flows::common::{self, instrumented},
	obs::FlowKind,
	response::{ResponseArgs, ResponseShaper},
	token_generator::TokenGenerator,
};

impl<B, T, S> Engine<B, T, S>
where
	B: Backend,
	T: TokenGenerator<B>,
	S: ResponseShaper<B>,
{
	/// Mints an access code bound to `authorization` and persists it.
	pub async fn issue_code(
		&self,
		authorization: Authorization<B>,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, S::Response)> {
		instrumented(FlowKind::IssueCode, "issue_code", async move {
			let now = self.now();
			let context = common::grant_context_from_authorization(&authorization, now);
			let code = self.token_generator().generate(&context).await;
			let (ctx, ()) = self
				.backend()
				.associate_access_code(&code, context.clone(), ctx)
				.await
				.map_err(|e| Error::server_error(e.to_string()))?;
			let response = self.response_shaper().shape(ResponseArgs {
				access_token: None,
				ttl: authorization.ttl,
				resource_owner: context.resource_owner,
				scope: context.scope,
				refresh_token: None,
				access_code: Some(TokenSecret::new(code)),
			});

			Ok((ctx, response))
		})
		.await
	}

	/// Mints an access token bound to `authorization` and persists it.
	pub async fn issue_token(
		&self,
		authorization: Authorization<B>,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, S::Response)> {
		instrumented(FlowKind::IssueToken, "issue_token", self.issue_token_core(authorization, ctx)).await
	}

	/// Mints both an access token and a refresh token over the same
	/// [`crate::context::GrantContext`]. Requires `authorization` to carry
	/// both a `client` and a `resource_owner`; the TokenGenerator and
	/// Backend are never invoked when that guard fails.
	pub async fn issue_token_and_refresh(
		&self,
		authorization: Authorization<B>,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, S::Response)> {
		instrumented(FlowKind::IssueTokenAndRefresh, "issue_token_and_refresh", async move {
			if !authorization.has_client_and_resource_owner() {
				return Err(Error::invalid_authorization(
					"issue_token_and_refresh requires both a client and a resource owner",
				));
			}

			let now = self.now();
			let context = common::grant_context_from_authorization(&authorization, now);
			let access_token = self.token_generator().generate(&context).await;
			let refresh_token = self.token_generator().generate(&context).await;
			let (ctx, ()) = self
				.backend()
				.associate_access_token(&access_token, context.clone(), ctx)
				.await
				.map_err(|e| Error::server_error(e.to_string()))?;
			let (ctx, ()) = self
				.backend()
				.associate_refresh_token(&refresh_token, context.clone(), ctx)
				.await
				.map_err(|e| Error::server_error(e.to_string()))?;
			let response = self.response_shaper().shape(ResponseArgs {
				access_token: Some(TokenSecret::new(access_token)),
				ttl: authorization.ttl,
				resource_owner: context.resource_owner,
				scope: context.scope,
				refresh_token: Some(TokenSecret::new(refresh_token)),
				access_code: None,
			});

			Ok((ctx, response))
		})
		.await
	}

	pub(crate) async fn issue_token_core(
		&self,
		authorization: Authorization<B>,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, S::Response)> {
		let now = self.now();
		let context = common::grant_context_from_authorization(&authorization, now);
		let token = self.token_generator().generate(&context).await;
		let (ctx, ()) = self
			.backend()
			.associate_access_token(&token, context.clone(), ctx)
			.await
			.map_err(|e| Error::server_error(e.to_string()))?;
		let response = self.response_shaper().shape(ResponseArgs {
			access_token: Some(TokenSecret::new(token)),
			ttl: authorization.ttl,
			resource_owner: context.resource_owner,
			scope: context.scope,
			refresh_token: None,
			access_code: None,
		});

		Ok((ctx, response))
	}
}

#[cfg(test)]
mod tests {
	// self
	use crate::{
		_prelude_test::*,
		auth::ScopeSet,
		authorization::Authorization,
		backend::{Backend, memory::InMemoryBackend},
	};

	#[tokio::test]
	async fn issue_token_and_refresh_requires_client_and_resource_owner() {
		let (engine, _backend) = test_engine(3_600, 3_600, 600);
		let scope = ScopeSet::new(["read"]).expect("Scope fixture should be valid.");
		let authorization: Authorization<InMemoryBackend> =
			Authorization::new(None, Some(resource_owner_record("alice")), scope, Duration::seconds(60));

		let err = engine
			.issue_token_and_refresh(authorization, ())
			.await
			.expect_err("Missing client should be rejected.");

		assert!(matches!(err, Error::InvalidAuthorization { .. }));
	}

	#[tokio::test]
	async fn issue_token_and_refresh_persists_both_artifacts() {
		let (engine, backend) = test_engine(3_600, 3_600, 600);
		let scope = ScopeSet::new(["read"]).expect("Scope fixture should be valid.");
		let authorization: Authorization<InMemoryBackend> = Authorization::new(
			Some(client_record("client-1")),
			Some(resource_owner_record("alice")),
			scope,
			Duration::seconds(60),
		);

		let (_, response) = engine
			.issue_token_and_refresh(authorization, ())
			.await
			.expect("Issuance should succeed.");

		let access_token = response.access_token.expect("Access token should be present.");
		let refresh_token = response.refresh_token.expect("Refresh token should be present.");

		backend
			.resolve_access_token(access_token.expose(), ())
			.await
			.expect("Persisted access token should resolve.");
		backend
			.resolve_refresh_token(refresh_token.expose(), ())
			.await
			.expect("Persisted refresh token should resolve.");
	}
}
