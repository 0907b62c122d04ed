//! Opaque token material generation, decoupled from persistence.

// self
use crate::{_prelude::*, backend::Backend, context::GrantContext};

/// Future returned by [`TokenGenerator::generate`].
pub type GeneratorFuture<'a> = Pin<Box<dyn Future<Output = String> + Send + 'a>>;

/// Produces opaque token bytes for a given [`GrantContext`]. Implementations
/// MUST be collision-resistant and unpredictable to adversaries in
/// production; a generator MAY be deterministic in tests.
pub trait TokenGenerator<B: Backend>: Send + Sync + 'static {
	/// Generates a new token string bound to `context`. The generator does
	/// not persist anything — `associate_*` is the engine's responsibility.
	fn generate<'a>(&'a self, context: &'a GrantContext<B>) -> GeneratorFuture<'a>;
}

/// [`TokenGenerator`] backed by a cryptographically secure random byte
/// string, base64 (URL-safe, no padding) encoded.
#[derive(Debug, Clone, Copy)]
pub struct RandomTokenGenerator {
	byte_length: usize,
}
impl RandomTokenGenerator {
	/// Builds a generator that produces `byte_length` bytes of randomness
	/// per token, base64-encoded.
	pub fn new(byte_length: usize) -> Self {
		Self { byte_length }
	}
}
impl Default for RandomTokenGenerator {
	fn default() -> Self {
		Self::new(32)
	}
}
impl<B: Backend> TokenGenerator<B> for RandomTokenGenerator {
	fn generate<'a>(&'a self, _context: &'a GrantContext<B>) -> GeneratorFuture<'a> {
		use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
		use rand::RngCore;

		let byte_length = self.byte_length;

		Box::pin(async move {
			let mut bytes = vec![0_u8; byte_length];

			rand::rng().fill_bytes(&mut bytes);

			URL_SAFE_NO_PAD.encode(bytes)
		})
	}
}

/// [`TokenGenerator`] that hands out sequential, predictable tokens. Useful
/// only for tests that assert on exact token values; never use this in
/// production, where predictability defeats the purpose of a bearer token.
#[derive(Debug, Default)]
pub struct DeterministicTokenGenerator {
	counter: Arc<std::sync::atomic::AtomicU64>,
}
impl<B: Backend> TokenGenerator<B> for DeterministicTokenGenerator {
	fn generate<'a>(&'a self, _context: &'a GrantContext<B>) -> GeneratorFuture<'a> {
		let next = self.counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

		Box::pin(async move { format!("test-token-{next}") })
	}
}
