//! The closed RFC 6749 error vocabulary returned by every [`crate::engine::Engine`] operation.

// self
use crate::_prelude::*;

/// Engine-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The ten `error` values RFC 6749 allows an authorization server to report,
/// plus the locally-scoped identifier and scope validation failures that feed
/// into them. A `Backend` or `TokenGenerator` failure is never forwarded
/// as-is — every call site maps it into one of these variants explicitly, so
/// callers only ever match against this closed set.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The resource owner or authorization server denied the request.
	#[error("Access denied: {reason}.")]
	AccessDenied {
		/// Human-readable detail; never includes secret material.
		reason: String,
	},
	/// Client authentication failed, or the client is unknown.
	#[error("Client authentication failed: {reason}.")]
	InvalidClient {
		/// Human-readable detail; never includes secret material.
		reason: String,
	},
	/// The provided authorization grant, access code, or refresh token is
	/// invalid, expired, revoked, or was issued to a different client.
	#[error("Invalid grant: {reason}.")]
	InvalidGrant {
		/// Human-readable detail; never includes secret material.
		reason: String,
	},
	/// The request is missing a required parameter, includes an unsupported
	/// parameter value, or is otherwise malformed.
	#[error("Invalid request: {reason}.")]
	InvalidRequest {
		/// Human-readable detail; never includes secret material.
		reason: String,
	},
	/// The `Authorization` being issued from is missing a client or resource
	/// owner that the requested issuance requires.
	#[error("Invalid authorization: {reason}.")]
	InvalidAuthorization {
		/// Human-readable detail; never includes secret material.
		reason: String,
	},
	/// The requested scope is invalid, unknown, malformed, or exceeds the
	/// scope granted by the resource owner or registered for the client.
	#[error("Invalid scope: {reason}.")]
	InvalidScope {
		/// Human-readable detail; never includes secret material.
		reason: String,
	},
	/// The authenticated client is not authorized to use this grant type.
	#[error("Unauthorized client: {reason}.")]
	UnauthorizedClient {
		/// Human-readable detail; never includes secret material.
		reason: String,
	},
	/// The authorization server does not support obtaining a response using
	/// this response type.
	#[error("Unsupported response type: {reason}.")]
	UnsupportedResponseType {
		/// Human-readable detail; never includes secret material.
		reason: String,
	},
	/// The authorization server encountered an unexpected condition.
	#[error("Server error: {reason}.")]
	ServerError {
		/// Human-readable detail; never includes secret material.
		reason: String,
	},
	/// The authorization server is currently unable to handle the request due
	/// to temporary overloading or maintenance.
	#[error("Temporarily unavailable: {reason}.")]
	TemporarilyUnavailable {
		/// Human-readable detail; never includes secret material.
		reason: String,
	},
}
impl Error {
	/// Returns the literal RFC 6749 `error` field value for this variant.
	pub fn as_rfc_code(&self) -> &'static str {
		match self {
			Self::AccessDenied { .. } => "access_denied",
			Self::InvalidClient { .. } => "invalid_client",
			Self::InvalidGrant { .. } => "invalid_grant",
			Self::InvalidRequest { .. } => "invalid_request",
			Self::InvalidAuthorization { .. } => "invalid_authorization",
			Self::InvalidScope { .. } => "invalid_scope",
			Self::UnauthorizedClient { .. } => "unauthorized_client",
			Self::UnsupportedResponseType { .. } => "unsupported_response_type",
			Self::ServerError { .. } => "server_error",
			Self::TemporarilyUnavailable { .. } => "temporarily_unavailable",
		}
	}

	pub(crate) fn invalid_request(reason: impl Into<String>) -> Self {
		Self::InvalidRequest { reason: reason.into() }
	}

	pub(crate) fn invalid_grant(reason: impl Into<String>) -> Self {
		Self::InvalidGrant { reason: reason.into() }
	}

	pub(crate) fn invalid_client(reason: impl Into<String>) -> Self {
		Self::InvalidClient { reason: reason.into() }
	}

	pub(crate) fn access_denied(reason: impl Into<String>) -> Self {
		Self::AccessDenied { reason: reason.into() }
	}

	pub(crate) fn invalid_authorization(reason: impl Into<String>) -> Self {
		Self::InvalidAuthorization { reason: reason.into() }
	}

	pub(crate) fn unauthorized_client(reason: impl Into<String>) -> Self {
		Self::UnauthorizedClient { reason: reason.into() }
	}

	pub(crate) fn invalid_scope(reason: impl Into<String>) -> Self {
		Self::InvalidScope { reason: reason.into() }
	}

	pub(crate) fn server_error(reason: impl Into<String>) -> Self {
		Self::ServerError { reason: reason.into() }
	}
}
impl From<crate::auth::IdentifierError> for Error {
	fn from(e: crate::auth::IdentifierError) -> Self {
		Self::invalid_request(e.to_string())
	}
}
impl From<crate::auth::ScopeValidationError> for Error {
	fn from(e: crate::auth::ScopeValidationError) -> Self {
		Self::InvalidScope { reason: e.to_string() }
	}
}
