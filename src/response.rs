//! Shapes a successful issuance into whatever the embedding application
//! wants to hand back to its caller.

// self
use crate::{_prelude::*, auth::TokenSecret, backend::Backend};

/// Everything an `issue_*` operation knows once it has succeeded: the
/// minted artifact(s), the relative lifetime used, and the Authorization
/// fields that were carried through. Opaque to the engine beyond this
/// struct — a [`ResponseShaper`] decides what becomes of it.
pub struct ResponseArgs<B: Backend> {
	/// The minted access token. Empty for `issue_code`, which mints an
	/// access code instead.
	pub access_token: Option<TokenSecret>,
	/// Relative lifetime used to compute the absolute expiry just persisted.
	pub ttl: Duration,
	/// The resource owner the artifact was issued on behalf of, if any.
	pub resource_owner: Option<B::ResourceOwner>,
	/// The effective scope granted.
	pub scope: B::Scope,
	/// The minted refresh token, present only for `issue_token_and_refresh`.
	pub refresh_token: Option<TokenSecret>,
	/// The minted access code, present only for `issue_code`.
	pub access_code: Option<TokenSecret>,
}
impl<B: Backend> Clone for ResponseArgs<B> {
	fn clone(&self) -> Self {
		Self {
			access_token: self.access_token.clone(),
			ttl: self.ttl,
			resource_owner: self.resource_owner.clone(),
			scope: self.scope.clone(),
			refresh_token: self.refresh_token.clone(),
			access_code: self.access_code.clone(),
		}
	}
}

/// Turns a successful issuance into the caller-visible response. Opaque to
/// the engine: the engine never reads the shaped value, only produces it.
pub trait ResponseShaper<B: Backend>: Send + Sync + 'static {
	/// The response type this shaper produces.
	type Response: Send + 'static;

	/// Shapes `args` into [`ResponseShaper::Response`].
	fn shape(&self, args: ResponseArgs<B>) -> Self::Response;
}

/// [`ResponseShaper`] that performs no transformation, returning
/// [`ResponseArgs`] unchanged. The natural default when the embedding
/// application wants to do its own response serialization downstream of the
/// engine.
pub struct DefaultResponseShaper<B> {
	_backend: std::marker::PhantomData<fn() -> B>,
}
impl<B> Default for DefaultResponseShaper<B> {
	fn default() -> Self {
		Self { _backend: std::marker::PhantomData }
	}
}
impl<B> Debug for DefaultResponseShaper<B> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DefaultResponseShaper").finish()
	}
}
impl<B: Backend> ResponseShaper<B> for DefaultResponseShaper<B> {
	type Response = ResponseArgs<B>;

	fn shape(&self, args: ResponseArgs<B>) -> Self::Response {
		args
	}
}
