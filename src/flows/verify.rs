//! Verification of previously-issued artifacts: access codes (by themselves,
//! and bound to a presented client) and access tokens.
//!
//! Expiry is handled identically in shape but not in the error it produces:
//! an expired access code maps to `invalid_grant` (an authorization-server
//! semantic — the grant itself is no longer usable), while an expired
//! access token maps to `access_denied` (a resource-server semantic). This
//! asymmetry is intentional and RFC-aligned; do not unify the two branches.

// self
use crate::{
	_prelude::*,
	backend::Backend,
	context::GrantContext,
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
	/// Resolves `code` and checks it has not expired. An expired code is
	/// revoked best-effort before the `invalid_grant` error is returned.
	pub async fn verify_access_code(
		&self,
		code: &str,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, GrantContext<B>)> {
		instrumented(FlowKind::VerifyAccessCode, "verify_access_code", async move {
			let (ctx, context) = self
				.backend()
				.resolve_access_code(code, ctx)
				.await
				.map_err(|e| Error::invalid_grant(e.to_string()))?;

			if context.is_expired(self.now()) {
				let _ = self.backend().revoke_access_code(code, ctx).await;

				return Err(Error::invalid_grant("access code has expired"));
			}

			Ok((ctx, context))
		})
		.await
	}

	/// Runs [`Self::verify_access_code`], then requires the code's bound
	/// client to equal `client` by value.
	pub async fn verify_access_code_for_client(
		&self,
		code: &str,
		client: &B::Client,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, GrantContext<B>)> {
		let (ctx, context) = self.verify_access_code(code, ctx).await?;

		match &context.client {
			Some(bound) if bound == client => Ok((ctx, context)),
			_ => Err(Error::invalid_grant("access code was not issued to this client")),
		}
	}

	/// Resolves `token` and checks it has not expired. An expired token is
	/// revoked best-effort before `access_denied` is returned.
	pub async fn verify_access_token(
		&self,
		token: &str,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, GrantContext<B>)> {
		instrumented(FlowKind::VerifyAccessToken, "verify_access_token", async move {
			let (ctx, context) = self
				.backend()
				.resolve_access_token(token, ctx)
				.await
				.map_err(|e| Error::access_denied(e.to_string()))?;

			if context.is_expired(self.now()) {
				let _ = self.backend().revoke_access_token(token, ctx).await;

				return Err(Error::access_denied("access token has expired"));
			}

			Ok((ctx, context))
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use crate::{_prelude_test::*, auth::ScopeSet, context::GrantContext};

	#[tokio::test]
	async fn verify_access_token_maps_expiry_to_access_denied() {
		let (engine, backend) = test_engine(3_600, 3_600, 600);
		let scope = ScopeSet::new(["read"]).expect("Scope fixture should be valid.");
		let context =
			GrantContext::new(None, None, OffsetDateTime::now_utc() - Duration::seconds(1), scope);

		backend.associate_access_token_now("expired-token".into(), context);

		let err = engine
			.verify_access_token("expired-token", ())
			.await
			.expect_err("Expired access token should be rejected.");

		assert!(matches!(err, Error::AccessDenied { .. }));
	}

	#[tokio::test]
	async fn verify_access_code_maps_expiry_to_invalid_grant() {
		let (engine, backend) = test_engine(3_600, 3_600, 600);
		let scope = ScopeSet::new(["read"]).expect("Scope fixture should be valid.");
		let context =
			GrantContext::new(None, None, OffsetDateTime::now_utc() - Duration::seconds(1), scope);

		backend.associate_access_code_now("expired-code".into(), context);

		let err = engine
			.verify_access_code("expired-code", ())
			.await
			.expect_err("Expired access code should be rejected.");

		assert!(matches!(err, Error::InvalidGrant { .. }));
	}

	#[tokio::test]
	async fn verify_access_code_for_client_rejects_mismatched_client() {
		let (engine, backend) = test_engine(3_600, 3_600, 600);

		backend.register_client(client_record("client-1"));
		backend.register_client(client_record("client-2"));

		let scope = ScopeSet::new(["read"]).expect("Scope fixture should be valid.");
		let context = GrantContext::new(
			Some(client_record("client-1")),
			None,
			OffsetDateTime::now_utc() + Duration::minutes(1),
			scope,
		);

		backend.associate_access_code_now("code-1".into(), context);

		let other_client = client_record("client-2");
		let err = engine
			.verify_access_code_for_client("code-1", &other_client, ())
			.await
			.expect_err("A code bound to a different client should be rejected.");

		assert!(matches!(err, Error::InvalidGrant { .. }));
	}
}
