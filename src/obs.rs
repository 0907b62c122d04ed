//! Optional observability helpers for engine operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_engine.flow` with the `flow`
//!   (operation) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `oauth2_engine_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Engine operations observed via tracing spans and metrics counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// `authorize_password`, public client.
	Password,
	/// `authorize_password`, confidential client variant.
	PasswordConfidential,
	/// `authorize_password`, implicit-grant variant.
	PasswordImplicit,
	/// `authorize_resource_owner`.
	ResourceOwner,
	/// `authorize_client_credentials`.
	ClientCredentials,
	/// `authorize_code_request`.
	CodeRequest,
	/// `authorize_code_grant`.
	CodeGrant,
	/// `issue_code`.
	IssueCode,
	/// `issue_token`.
	IssueToken,
	/// `issue_token_and_refresh`.
	IssueTokenAndRefresh,
	/// `verify_access_code` and `verify_access_code_for_client`.
	VerifyAccessCode,
	/// `verify_access_token`.
	VerifyAccessToken,
	/// `refresh_access_token`.
	Refresh,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Password => "password",
			FlowKind::PasswordConfidential => "password_confidential",
			FlowKind::PasswordImplicit => "password_implicit",
			FlowKind::ResourceOwner => "resource_owner",
			FlowKind::ClientCredentials => "client_credentials",
			FlowKind::CodeRequest => "code_request",
			FlowKind::CodeGrant => "code_grant",
			FlowKind::IssueCode => "issue_code",
			FlowKind::IssueToken => "issue_token",
			FlowKind::IssueTokenAndRefresh => "issue_token_and_refresh",
			FlowKind::VerifyAccessCode => "verify_access_code",
			FlowKind::VerifyAccessToken => "verify_access_token",
			FlowKind::Refresh => "refresh",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to an engine flow.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
