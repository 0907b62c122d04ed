//! Minimal Resource Owner Password Credentials grant against the in-memory
//! reference backend.

// self
use oauth2_engine::{
	auth::{ResourceOwnerId, ScopeSet},
	backend::memory::{InMemoryBackend, ResourceOwnerRecord},
	config::StaticConfig,
	engine::Engine,
	response::DefaultResponseShaper,
	token_generator::RandomTokenGenerator,
};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let backend = std::sync::Arc::new(InMemoryBackend::default());

	backend.register_resource_owner(ResourceOwnerRecord {
		id: ResourceOwnerId::new("alice")?,
		password: "correct-horse-battery-staple".into(),
		registered_scope: ScopeSet::new(["read", "write"])?,
	});

	let config = StaticConfig::builder().password_credentials(time::Duration::seconds(3_600)).build()?;
	let engine =
		Engine::new(backend, RandomTokenGenerator::default(), DefaultResponseShaper::default(), config);
	let requested_scope = ScopeSet::new(["read"])?;
	let (ctx, authorization) =
		engine.authorize_password("alice", "correct-horse-battery-staple", &requested_scope, ()).await?;
	let (_ctx, response) = engine.issue_token(authorization, ctx).await?;

	println!(
		"access_token={} scope={}",
		response.access_token.expect("Password grant should mint an access token.").expose(),
		response.scope.normalized(),
	);

	Ok(())
}
