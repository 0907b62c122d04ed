//! The engine: the public surface that orchestrates [`Backend`] calls into
//! [`Authorization`]s and issuance responses.

// self
use crate::{
	_prelude::*,
	backend::Backend,
	clock::{Clock, SystemClock},
	config::Config,
	response::ResponseShaper,
	token_generator::TokenGenerator,
};

/// Coordinates a single OAuth 2.0 authorization engine instance.
///
/// The engine itself is stateless — every piece of per-request state lives
/// either in the [`crate::authorization::Authorization`] handed back to the
/// caller or in the `AppCtx` threaded through [`Backend`] calls. An `Engine`
/// is cheap to clone (every field is an [`Arc`]) so it can be shared across
/// request handlers without re-wiring its collaborators.
pub struct Engine<B, T, S>
where
	B: Backend,
	T: TokenGenerator<B>,
	S: ResponseShaper<B>,
{
	backend: Arc<B>,
	token_generator: Arc<T>,
	response_shaper: Arc<S>,
	config: Arc<dyn Config>,
	clock: Arc<dyn Clock>,
}
impl<B, T, S> Engine<B, T, S>
where
	B: Backend,
	T: TokenGenerator<B>,
	S: ResponseShaper<B>,
{
	/// Creates an engine using the system wall clock.
	pub fn new(backend: Arc<B>, token_generator: T, response_shaper: S, config: impl Config + 'static) -> Self {
		Self::with_clock(backend, token_generator, response_shaper, config, Arc::new(SystemClock))
	}

	/// Creates an engine with an explicit [`Clock`], for deterministic tests.
	pub fn with_clock(
		backend: Arc<B>,
		token_generator: T,
		response_shaper: S,
		config: impl Config + 'static,
		clock: Arc<dyn Clock>,
	) -> Self {
		Self {
			backend,
			token_generator: Arc::new(token_generator),
			response_shaper: Arc::new(response_shaper),
			config: Arc::new(config),
			clock,
		}
	}

	pub(crate) fn backend(&self) -> &B {
		&self.backend
	}

	pub(crate) fn token_generator(&self) -> &T {
		&self.token_generator
	}

	pub(crate) fn response_shaper(&self) -> &S {
		&self.response_shaper
	}

	pub(crate) fn config(&self) -> &dyn Config {
		self.config.as_ref()
	}

	pub(crate) fn now(&self) -> OffsetDateTime {
		self.clock.now()
	}
}
impl<B, T, S> Clone for Engine<B, T, S>
where
	B: Backend,
	T: TokenGenerator<B>,
	S: ResponseShaper<B>,
{
	fn clone(&self) -> Self {
		Self {
			backend: self.backend.clone(),
			token_generator: self.token_generator.clone(),
			response_shaper: self.response_shaper.clone(),
			config: self.config.clone(),
			clock: self.clock.clone(),
		}
	}
}
impl<B, T, S> Debug for Engine<B, T, S>
where
	B: Backend,
	T: TokenGenerator<B>,
	S: ResponseShaper<B>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Engine").finish_non_exhaustive()
	}
}
