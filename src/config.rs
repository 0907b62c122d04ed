//! Grant lifetime configuration consulted by every issuing flow.

// self
use crate::_prelude::*;

/// The grants whose issued credentials carry a lifetime the engine must
/// look up before stamping a [`crate::context::GrantContext`] expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantKind {
	/// Resource owner password credentials grant (public, confidential, or
	/// implicit variants all share this lifetime).
	PasswordCredentials,
	/// Client credentials grant.
	ClientCredentials,
	/// Authorization code grant, covering both the access code and the
	/// access/refresh token pair minted when it is exchanged.
	CodeGrant,
}

/// Supplies the access/refresh token and access code lifetimes an
/// [`crate::engine::Engine`] stamps into each [`crate::context::GrantContext`]
/// it creates. Implementations are consulted once per issuing call and never
/// cached by the engine, so a `Config` may vary its answer per client or
/// tenant if the embedding application needs that.
pub trait Config: Send + Sync + 'static {
	/// Returns how long a grant of `kind` should remain valid from the
	/// moment it is issued.
	fn expiry_time(&self, kind: GrantKind) -> Duration;
}

/// Errors raised while building a [`StaticConfig`].
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum StaticConfigError {
	/// A lifetime must not be negative; zero is a valid, if unusual, lifetime.
	#[error("The {kind:?} lifetime must not be negative, got {seconds} second(s).")]
	NegativeLifetime {
		/// Grant kind whose lifetime failed validation.
		kind: GrantKindLabel,
		/// Offending value, in whole seconds.
		seconds: i64,
	},
}

/// Stand-in for [`GrantKind`] inside error values so [`StaticConfigError`]
/// stays `PartialEq + Eq` without requiring that of [`GrantKind`] itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantKindLabel {
	/// See [`GrantKind::PasswordCredentials`].
	PasswordCredentials,
	/// See [`GrantKind::ClientCredentials`].
	ClientCredentials,
	/// See [`GrantKind::CodeGrant`].
	CodeGrant,
}

/// Builder for a [`Config`] backed by three fixed lifetimes, validated on
/// [`build`](StaticConfigBuilder::build).
#[derive(Debug)]
pub struct StaticConfigBuilder {
	password_credentials: Option<Duration>,
	client_credentials: Option<Duration>,
	code_grant: Option<Duration>,
}
impl StaticConfigBuilder {
	/// Sets the password credentials grant lifetime.
	pub fn password_credentials(mut self, lifetime: Duration) -> Self {
		self.password_credentials = Some(lifetime);

		self
	}

	/// Sets the client credentials grant lifetime.
	pub fn client_credentials(mut self, lifetime: Duration) -> Self {
		self.client_credentials = Some(lifetime);

		self
	}

	/// Sets the authorization code grant lifetime.
	pub fn code_grant(mut self, lifetime: Duration) -> Self {
		self.code_grant = Some(lifetime);

		self
	}

	/// Consumes the builder and validates the resulting lifetimes.
	pub fn build(self) -> std::result::Result<StaticConfig, StaticConfigError> {
		let password_credentials =
			self.password_credentials.unwrap_or(Duration::seconds(3_600));
		let client_credentials = self.client_credentials.unwrap_or(Duration::seconds(3_600));
		let code_grant = self.code_grant.unwrap_or(Duration::seconds(600));

		validate_lifetime(GrantKindLabel::PasswordCredentials, password_credentials)?;
		validate_lifetime(GrantKindLabel::ClientCredentials, client_credentials)?;
		validate_lifetime(GrantKindLabel::CodeGrant, code_grant)?;

		Ok(StaticConfig { password_credentials, client_credentials, code_grant })
	}
}

fn validate_lifetime(
	kind: GrantKindLabel,
	lifetime: Duration,
) -> std::result::Result<(), StaticConfigError> {
	if lifetime < Duration::ZERO {
		Err(StaticConfigError::NegativeLifetime { kind, seconds: lifetime.whole_seconds() })
	} else {
		Ok(())
	}
}

/// A [`Config`] that always answers with one of three fixed, pre-validated
/// lifetimes. Suitable for deployments where every client and tenant shares
/// the same grant lifetimes; embedders with per-client policy should
/// implement [`Config`] directly instead.
#[derive(Debug, Clone, Copy)]
pub struct StaticConfig {
	password_credentials: Duration,
	client_credentials: Duration,
	code_grant: Duration,
}
impl StaticConfig {
	/// Starts building a [`StaticConfig`]; unset lifetimes default to one
	/// hour for tokens and ten minutes for authorization codes.
	pub fn builder() -> StaticConfigBuilder {
		StaticConfigBuilder { password_credentials: None, client_credentials: None, code_grant: None }
	}
}
impl Config for StaticConfig {
	fn expiry_time(&self, kind: GrantKind) -> Duration {
		match kind {
			GrantKind::PasswordCredentials => self.password_credentials,
			GrantKind::ClientCredentials => self.client_credentials,
			GrantKind::CodeGrant => self.code_grant,
		}
	}
}
