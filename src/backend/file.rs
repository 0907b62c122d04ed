//! File-backed [`Backend`] that persists issued artifacts as JSON.

// std
use std::{
	fs::{self, File},
	io::Write as _,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::{ClientId, ResourceOwnerId, ScopeSet},
	backend::{
		Backend, BackendFuture,
		memory::{ClientRecord, InMemoryBackend, MemoryBackendError, ResourceOwnerRecord},
	},
	context::GrantContext,
};

/// Errors raised by [`FileBackend`] while loading or persisting its
/// snapshot file.
#[derive(Debug, ThisError)]
pub enum FileBackendError {
	/// The underlying in-memory operation failed.
	#[error(transparent)]
	Memory(#[from] MemoryBackendError),
	/// The snapshot file could not be read or written.
	#[error("I/O failure at {path}: {source}.")]
	Io {
		/// Path that was being read or written.
		path: String,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},
	/// The snapshot file could not be parsed as JSON.
	#[error("Failed to parse snapshot at {path}: {source}.")]
	Deserialize {
		/// Path that failed to parse.
		path: String,
		/// Underlying JSON failure.
		#[source]
		source: serde_json::Error,
	},
}

#[derive(Serialize, Deserialize, Default)]
struct Snapshot {
	access_codes: HashMap<String, SerializedContext>,
	access_tokens: HashMap<String, SerializedContext>,
	refresh_tokens: HashMap<String, SerializedContext>,
}

#[derive(Serialize, Deserialize)]
struct SerializedContext {
	client: Option<ClientId>,
	resource_owner: Option<ResourceOwnerId>,
	#[serde(with = "time::serde::rfc3339")]
	expiry_time: OffsetDateTime,
	scope: ScopeSet,
}

/// A [`Backend`] that wraps [`InMemoryBackend`] for lookups and client/owner
/// registration, persisting every issued artifact to a JSON snapshot file
/// after each mutation via a write-to-temp-then-rename so a crash mid-write
/// never leaves a torn file.
///
/// Client and resource owner registrations are NOT persisted — those are
/// expected to come from the embedding application's own configuration at
/// startup, the same way [`InMemoryBackend::register_client`] is used in
/// tests. Only the artifact maps (access codes, access tokens, refresh
/// tokens) survive a restart.
pub struct FileBackend {
	path: PathBuf,
	inner: InMemoryBackend,
}
impl FileBackend {
	/// Opens (or creates) a snapshot at `path`, eagerly loading any
	/// previously-persisted artifacts. Client and resource owner
	/// registrations must be re-applied by the caller after opening.
	pub fn open(path: impl Into<PathBuf>) -> std::result::Result<Self, FileBackendError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = if path.exists() { Self::load_snapshot(&path)? } else { Snapshot::default() };
		let inner = InMemoryBackend::default();

		for (code, context) in snapshot.access_codes {
			inner.associate_access_code_now(code, context.into());
		}
		for (token, context) in snapshot.access_tokens {
			inner.associate_access_token_now(token, context.into());
		}
		for (token, context) in snapshot.refresh_tokens {
			inner.associate_refresh_token_now(token, context.into());
		}

		Ok(Self { path, inner })
	}

	/// Registers a client on the underlying in-memory backend.
	pub fn register_client(&self, record: ClientRecord) {
		self.inner.register_client(record);
	}

	/// Registers a resource owner on the underlying in-memory backend.
	pub fn register_resource_owner(&self, record: ResourceOwnerRecord) {
		self.inner.register_resource_owner(record);
	}

	fn ensure_parent_exists(path: &Path) -> std::result::Result<(), FileBackendError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent)
				.map_err(|source| FileBackendError::Io { path: parent.display().to_string(), source })?;
		}

		Ok(())
	}

	fn load_snapshot(path: &Path) -> std::result::Result<Snapshot, FileBackendError> {
		let metadata = path
			.metadata()
			.map_err(|source| FileBackendError::Io { path: path.display().to_string(), source })?;

		if metadata.len() == 0 {
			return Ok(Snapshot::default());
		}

		let bytes = fs::read(path)
			.map_err(|source| FileBackendError::Io { path: path.display().to_string(), source })?;

		serde_json::from_slice(&bytes)
			.map_err(|source| FileBackendError::Deserialize { path: path.display().to_string(), source })
	}

	fn build_snapshot(&self) -> Snapshot {
		Snapshot {
			access_codes: self
				.inner
				.access_codes_snapshot()
				.iter()
				.map(|(k, v)| (k.clone(), SerializedContext::from(v)))
				.collect(),
			access_tokens: self
				.inner
				.access_tokens_snapshot()
				.iter()
				.map(|(k, v)| (k.clone(), SerializedContext::from(v)))
				.collect(),
			refresh_tokens: self
				.inner
				.refresh_tokens_snapshot()
				.iter()
				.map(|(k, v)| (k.clone(), SerializedContext::from(v)))
				.collect(),
		}
	}

	fn persist(&self) -> std::result::Result<(), FileBackendError> {
		let snapshot = self.build_snapshot();
		let serialized = serde_json::to_vec_pretty(&snapshot).map_err(|source| {
			FileBackendError::Deserialize { path: self.path.display().to_string(), source }
		})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path)
				.map_err(|source| FileBackendError::Io { path: tmp_path.display().to_string(), source })?;

			file
				.write_all(&serialized)
				.map_err(|source| FileBackendError::Io { path: tmp_path.display().to_string(), source })?;
			file
				.sync_all()
				.map_err(|source| FileBackendError::Io { path: tmp_path.display().to_string(), source })?;
		}

		fs::rename(&tmp_path, &self.path)
			.map_err(|source| FileBackendError::Io { path: self.path.display().to_string(), source })
	}
}
impl Debug for FileBackend {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FileBackend").field("path", &self.path).finish()
	}
}
impl From<SerializedContext> for GrantContext<InMemoryBackend> {
	fn from(value: SerializedContext) -> Self {
		let client = value.client.map(|id| ClientRecord {
			id,
			secret: None,
			redirect_uris: Vec::new(),
			registered_scope: ScopeSet::default(),
		});
		let resource_owner = value.resource_owner.map(|id| ResourceOwnerRecord {
			id,
			password: String::new(),
			registered_scope: ScopeSet::default(),
		});

		GrantContext::new(client, resource_owner, value.expiry_time, value.scope)
	}
}
impl From<&GrantContext<InMemoryBackend>> for SerializedContext {
	fn from(context: &GrantContext<InMemoryBackend>) -> Self {
		Self {
			client: context.client.as_ref().map(|c| c.id.clone()),
			resource_owner: context.resource_owner.as_ref().map(|r| r.id.clone()),
			expiry_time: context.expiry_time,
			scope: context.scope.clone(),
		}
	}
}

impl Backend for FileBackend {
	type AppCtx = ();
	type Client = ClientRecord;
	type Error = FileBackendError;
	type ResourceOwner = ResourceOwnerRecord;
	type Scope = ScopeSet;

	fn authenticate_username_password<'a>(
		&'a self,
		username: &'a str,
		password: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::ResourceOwner, Self> {
		Box::pin(async move {
			let ((), record) = self.inner.authenticate_username_password(username, password, ()).await?;

			Ok((ctx, record))
		})
	}

	fn authenticate_client<'a>(
		&'a self,
		client_id: &'a str,
		client_secret: Option<&'a str>,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::Client, Self> {
		Box::pin(async move {
			let ((), record) = self.inner.authenticate_client(client_id, client_secret, ()).await?;

			Ok((ctx, record))
		})
	}

	fn get_client_identity<'a>(
		&'a self,
		client_id: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::Client, Self> {
		Box::pin(async move {
			let ((), record) = self.inner.get_client_identity(client_id, ()).await?;

			Ok((ctx, record))
		})
	}

	fn verify_redirection_uri<'a>(
		&'a self,
		client: &'a Self::Client,
		uri: &'a Url,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self> {
		Box::pin(async move {
			self.inner.verify_redirection_uri(client, uri, ()).await?;

			Ok((ctx, ()))
		})
	}

	fn verify_resowner_scope<'a>(
		&'a self,
		resource_owner: &'a Self::ResourceOwner,
		requested_scope: &'a Self::Scope,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::Scope, Self> {
		Box::pin(async move {
			let ((), effective) =
				self.inner.verify_resowner_scope(resource_owner, requested_scope, ()).await?;

			Ok((ctx, effective))
		})
	}

	fn verify_client_scope<'a>(
		&'a self,
		client: &'a Self::Client,
		requested_scope: &'a Self::Scope,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::Scope, Self> {
		Box::pin(async move {
			let ((), effective) = self.inner.verify_client_scope(client, requested_scope, ()).await?;

			Ok((ctx, effective))
		})
	}

	fn verify_scope<'a>(
		&'a self,
		registered_scope: &'a Self::Scope,
		requested_scope: &'a Self::Scope,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, Self::Scope, Self> {
		Box::pin(async move {
			let ((), effective) = self.inner.verify_scope(registered_scope, requested_scope, ()).await?;

			Ok((ctx, effective))
		})
	}

	fn associate_access_code<'a>(
		&'a self,
		code: &'a str,
		context: GrantContext<Self>,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self> {
		Box::pin(async move {
			self.inner.associate_access_code_now(code.to_owned(), context);
			self.persist()?;

			Ok((ctx, ()))
		})
	}

	fn associate_access_token<'a>(
		&'a self,
		token: &'a str,
		context: GrantContext<Self>,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self> {
		Box::pin(async move {
			self.inner.associate_access_token_now(token.to_owned(), context);
			self.persist()?;

			Ok((ctx, ()))
		})
	}

	fn associate_refresh_token<'a>(
		&'a self,
		token: &'a str,
		context: GrantContext<Self>,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self> {
		Box::pin(async move {
			self.inner.associate_refresh_token_now(token.to_owned(), context);
			self.persist()?;

			Ok((ctx, ()))
		})
	}

	fn resolve_access_code<'a>(
		&'a self,
		code: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, GrantContext<Self>, Self> {
		Box::pin(async move {
			let ((), context) = self.inner.resolve_access_code(code, ()).await?;

			Ok((ctx, context))
		})
	}

	fn resolve_access_token<'a>(
		&'a self,
		token: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, GrantContext<Self>, Self> {
		Box::pin(async move {
			let ((), context) = self.inner.resolve_access_token(token, ()).await?;

			Ok((ctx, context))
		})
	}

	fn resolve_refresh_token<'a>(
		&'a self,
		token: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, GrantContext<Self>, Self> {
		Box::pin(async move {
			let ((), context) = self.inner.resolve_refresh_token(token, ()).await?;

			Ok((ctx, context))
		})
	}

	fn revoke_access_code<'a>(
		&'a self,
		code: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self> {
		Box::pin(async move {
			self.inner.revoke_access_code(code, ()).await?;
			self.persist()?;

			Ok((ctx, ()))
		})
	}

	fn revoke_access_token<'a>(
		&'a self,
		token: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self> {
		Box::pin(async move {
			self.inner.revoke_access_token(token, ()).await?;
			self.persist()?;

			Ok((ctx, ()))
		})
	}

	fn revoke_refresh_token<'a>(
		&'a self,
		token: &'a str,
		ctx: Self::AppCtx,
	) -> BackendFuture<'a, (), Self> {
		Box::pin(async move {
			self.inner.revoke_refresh_token(token, ()).await?;
			self.persist()?;

			Ok((ctx, ()))
		})
	}
}
