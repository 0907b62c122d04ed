//! Minimal Client Credentials grant against the in-memory reference backend.

// self
use oauth2_engine::{
	auth::{ClientId, ScopeSet},
	backend::memory::{ClientRecord, InMemoryBackend},
	config::StaticConfig,
	engine::Engine,
	response::DefaultResponseShaper,
	token_generator::RandomTokenGenerator,
};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let backend = std::sync::Arc::new(InMemoryBackend::default());

	backend.register_client(ClientRecord {
		id: ClientId::new("service-a")?,
		secret: Some("service-a-secret".into()),
		redirect_uris: Vec::new(),
		registered_scope: ScopeSet::new(["reports:read"])?,
	});

	let config = StaticConfig::builder().client_credentials(time::Duration::seconds(3_600)).build()?;
	let engine =
		Engine::new(backend, RandomTokenGenerator::default(), DefaultResponseShaper::default(), config);
	let requested_scope = ScopeSet::new(["reports:read"])?;
	let (ctx, authorization) = engine
		.authorize_client_credentials("service-a", Some("service-a-secret"), &requested_scope, ())
		.await?;
	let (_ctx, response) = engine.issue_token(authorization, ctx).await?;

	println!(
		"access_token={} scope={}",
		response.access_token.expect("Client credentials grant should mint an access token.").expose(),
		response.scope.normalized(),
	);

	Ok(())
}
