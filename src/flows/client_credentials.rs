//! Client Credentials grant.

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
	/// Authenticates the client and narrows `requested_scope` to what it is
	/// registered for. On success the returned [`Authorization`] carries no
	/// `resource_owner`.
	pub async fn authorize_client_credentials(
		&self,
		client_id: &str,
		client_secret: Option<&str>,
		requested_scope: &B::Scope,
		ctx: B::AppCtx,
	) -> crate::error::Result<(B::AppCtx, Authorization<B>)> {
		instrumented(FlowKind::ClientCredentials, "authorize_client_credentials", async move {
			let (ctx, client) = self
				.backend()
				.authenticate_client(client_id, client_secret, ctx)
				.await
				.map_err(|e| Error::invalid_client(e.to_string()))?;
			let (ctx, scope) = self
				.backend()
				.verify_client_scope(&client, requested_scope, ctx)
				.await
				.map_err(|e| Error::invalid_scope(e.to_string()))?;
			let ttl = self.config().expiry_time(GrantKind::ClientCredentials);

			Ok((ctx, Authorization::new(Some(client), None, scope, ttl)))
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use crate::{_prelude_test::*, auth::ScopeSet};

	#[tokio::test]
	async fn authorize_client_credentials_rejects_unregistered_scope() {
		let (engine, backend) = test_engine(3_600, 3_600, 600);

		backend.register_client(client_record("client-1"));

		let requested = ScopeSet::new(["admin"]).expect("Scope fixture should be valid.");
		let err = engine
			.authorize_client_credentials("client-1", None, &requested, ())
			.await
			.expect_err("Unregistered scope should be rejected.");

		assert!(matches!(err, Error::InvalidScope { .. }));
	}

	#[tokio::test]
	async fn authorize_client_credentials_carries_no_resource_owner() {
		let (engine, backend) = test_engine(3_600, 3_600, 600);

		backend.register_client(client_record("client-1"));

		let requested = ScopeSet::new(["read"]).expect("Scope fixture should be valid.");
		let (_, authorization) = engine
			.authorize_client_credentials("client-1", None, &requested, ())
			.await
			.expect("Client credentials grant should succeed.");

		assert!(authorization.resource_owner.is_none());
		assert!(authorization.client.is_some());
	}
}
