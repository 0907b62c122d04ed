//! The engine's intermediate, pre-issuance value.

// self
use crate::{_prelude::*, backend::Backend};

/// The record an `authorize_*` operation hands back to the caller and an
/// `issue_*` operation consumes exactly once.
///
/// Modeled as a single struct with optional `client`/`resource_owner` rather
/// than a tagged union over the originating flow: every flow in this engine
/// narrows to the same three fields, and callers that need to distinguish
/// "client-only" from "resource-owner-only" from "full" can do so by
/// matching on [`Authorization::client`] and [`Authorization::resource_owner`]
/// directly. Not persisted or cached by the engine — what a caller does
/// between obtaining one and passing it to an `issue_*` call is outside the
/// engine's guarantees.
pub struct Authorization<B: Backend> {
	/// The authenticated client, when one was involved in this flow.
	pub client: Option<B::Client>,
	/// The authenticated resource owner, when one was involved in this flow.
	pub resource_owner: Option<B::ResourceOwner>,
	/// The effective scope: the value returned by the Backend's
	/// scope-verifier, which may be narrower than what was requested.
	pub scope: B::Scope,
	/// Relative lifetime, in seconds, captured at construction time.
	pub ttl: Duration,
}
impl<B: Backend> Authorization<B> {
	/// Builds an Authorization. `ttl` must be non-negative; at least one of
	/// `client`/`resource_owner` must be present.
	pub fn new(
		client: Option<B::Client>,
		resource_owner: Option<B::ResourceOwner>,
		scope: B::Scope,
		ttl: Duration,
	) -> Self {
		debug_assert!(ttl >= Duration::ZERO, "Authorization ttl must be non-negative.");
		debug_assert!(
			client.is_some() || resource_owner.is_some(),
			"Authorization must carry a client or a resource owner."
		);

		Self { client, resource_owner, scope, ttl }
	}

	/// Sets the client, used by `authorize_password`'s confidential and
	/// implicit variants to enrich a public-client result after the fact.
	pub fn with_client(mut self, client: B::Client) -> Self {
		self.client = Some(client);

		self
	}

	/// Whether both `client` and `resource_owner` are present, the guard
	/// `issue_token_and_refresh` enforces before minting anything.
	pub(crate) fn has_client_and_resource_owner(&self) -> bool {
		self.client.is_some() && self.resource_owner.is_some()
	}
}
impl<B: Backend> Clone for Authorization<B> {
	fn clone(&self) -> Self {
		Self {
			client: self.client.clone(),
			resource_owner: self.resource_owner.clone(),
			scope: self.scope.clone(),
			ttl: self.ttl,
		}
	}
}
impl<B: Backend> Debug for Authorization<B>
where
	B::Client: Debug,
	B::ResourceOwner: Debug,
	B::Scope: Debug,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authorization")
			.field("client", &self.client)
			.field("resource_owner", &self.resource_owner)
			.field("scope", &self.scope)
			.field("ttl", &self.ttl)
			.finish()
	}
}
