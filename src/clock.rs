//! Time source abstraction so expiry checks are deterministic under test.

// self
use crate::_prelude::*;

/// Supplies the current instant to the engine. Production code uses
/// [`SystemClock`]; tests substitute a fixed or steppable clock to exercise
/// expiry behavior without sleeping.
pub trait Clock: Send + Sync + 'static {
	/// Returns the current time.
	fn now(&self) -> OffsetDateTime;
}

/// [`Clock`] backed by the system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc()
	}
}

/// [`Clock`] that always reports a fixed instant, advanced explicitly by
/// tests via [`FixedClock::advance`].
#[derive(Debug, Clone)]
pub struct FixedClock {
	now: Arc<RwLock<OffsetDateTime>>,
}
impl FixedClock {
	/// Builds a clock fixed at `now`.
	pub fn new(now: OffsetDateTime) -> Self {
		Self { now: Arc::new(RwLock::new(now)) }
	}

	/// Moves the clock forward by `duration`.
	pub fn advance(&self, duration: Duration) {
		*self.now.write() += duration;
	}
}
impl Clock for FixedClock {
	fn now(&self) -> OffsetDateTime {
		*self.now.read()
	}
}
