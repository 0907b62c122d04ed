//! The persisted mapping associated with each issued artifact.

// self
use crate::{_prelude::*, backend::Backend};

/// The state a [`crate::engine::Engine`] persists alongside every issued
/// access code, access token, or refresh token.
///
/// Built inside an `issue_*` step immediately before the artifact is
/// generated, handed to the [`Backend`] via `associate_*`, and later
/// retrieved by `resolve_*`. Equality is by field value, not by identity.
/// `expiry_time` is always absolute — it is the only time representation the
/// engine persists.
pub struct GrantContext<B: Backend> {
	/// The client this artifact was issued to, when one was involved.
	pub client: Option<B::Client>,
	/// The resource owner this artifact was issued on behalf of, when one
	/// was involved.
	pub resource_owner: Option<B::ResourceOwner>,
	/// Absolute instant at which the artifact becomes invalid.
	pub expiry_time: OffsetDateTime,
	/// The scope granted to the artifact.
	pub scope: B::Scope,
}
impl<B: Backend> GrantContext<B> {
	/// Builds a context from the fields an `issue_*` step has in hand: the
	/// optional client and resource owner carried by the
	/// [`crate::authorization::Authorization`] being consumed, an absolute
	/// expiry computed as `clock.now() + ttl`, and the granted scope.
	pub fn new(
		client: Option<B::Client>,
		resource_owner: Option<B::ResourceOwner>,
		expiry_time: OffsetDateTime,
		scope: B::Scope,
	) -> Self {
		Self { client, resource_owner, expiry_time, scope }
	}

	/// Whether `now` is at or past this context's absolute expiry.
	pub fn is_expired(&self, now: OffsetDateTime) -> bool {
		now >= self.expiry_time
	}
}
impl<B: Backend> Clone for GrantContext<B> {
	fn clone(&self) -> Self {
		Self {
			client: self.client.clone(),
			resource_owner: self.resource_owner.clone(),
			expiry_time: self.expiry_time,
			scope: self.scope.clone(),
		}
	}
}
impl<B: Backend> Debug for GrantContext<B>
where
	B::Client: Debug,
	B::ResourceOwner: Debug,
	B::Scope: Debug,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GrantContext")
			.field("client", &self.client)
			.field("resource_owner", &self.resource_owner)
			.field("expiry_time", &self.expiry_time)
			.field("scope", &self.scope)
			.finish()
	}
}
