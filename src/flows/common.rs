//! Shared helpers used by every flow implementation.

// self
use crate::{
	_prelude::*,
	authorization::Authorization,
	backend::Backend,
	context::GrantContext,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Builds the [`GrantContext`] persisted alongside a freshly-issued
/// artifact: a pure function of `(client, expiry_absolute, resource_owner,
/// scope)`, computed from the consumed [`Authorization`] and the absolute
/// instant `now + authorization.ttl`.
pub(crate) fn grant_context_from_authorization<B: Backend>(
	authorization: &Authorization<B>,
	now: OffsetDateTime,
) -> GrantContext<B> {
	GrantContext::new(
		authorization.client.clone(),
		authorization.resource_owner.clone(),
		now + authorization.ttl,
		authorization.scope.clone(),
	)
}

/// Wraps `fut` in a [`FlowSpan`] tagged with `kind`/`label` and records the
/// attempt/success/failure outcome via [`obs::record_flow_outcome`]. Every
/// public `Engine` operation runs through this so the observability
/// behavior stays identical across flows instead of being re-derived at
/// each call site.
pub(crate) async fn instrumented<F, T>(
	kind: FlowKind,
	label: &'static str,
	fut: F,
) -> crate::error::Result<T>
where
	F: Future<Output = crate::error::Result<T>>,
{
	let span = FlowSpan::new(kind, label);

	obs::record_flow_outcome(kind, FlowOutcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => obs::record_flow_outcome(kind, FlowOutcome::Success),
		Err(_) => obs::record_flow_outcome(kind, FlowOutcome::Failure),
	}

	result
}
