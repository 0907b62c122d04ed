//! Minimal Authorization Code grant: issue a code at the authorization
//! endpoint, then exchange it at the token endpoint.

// self
use oauth2_engine::{
	auth::{ClientId, ResourceOwnerId, ScopeSet},
	backend::memory::{ClientRecord, InMemoryBackend, ResourceOwnerRecord},
	config::StaticConfig,
	engine::Engine,
	response::DefaultResponseShaper,
	token_generator::RandomTokenGenerator,
	url::Url,
};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let redirect_uri = Url::parse("https://client.example.com/callback")?;
	let backend = std::sync::Arc::new(InMemoryBackend::default());

	backend.register_client(ClientRecord {
		id: ClientId::new("demo-client")?,
		secret: Some("demo-secret".into()),
		redirect_uris: vec![redirect_uri.clone()],
		registered_scope: ScopeSet::new(["read", "write"])?,
	});
	backend.register_resource_owner(ResourceOwnerRecord {
		id: ResourceOwnerId::new("alice")?,
		password: "correct-horse-battery-staple".into(),
		registered_scope: ScopeSet::new(["read"])?,
	});

	let config = StaticConfig::builder()
		.password_credentials(time::Duration::seconds(3_600))
		.code_grant(time::Duration::seconds(600))
		.build()?;
	let engine =
		Engine::new(backend, RandomTokenGenerator::default(), DefaultResponseShaper::default(), config);
	let requested_scope = ScopeSet::new(["read"])?;
	let (ctx, authorization) = engine
		.authorize_code_request(
			"demo-client",
			&redirect_uri,
			"alice",
			"correct-horse-battery-staple",
			&requested_scope,
			(),
		)
		.await?;
	let (ctx, code_response) = engine.issue_code(authorization, ctx).await?;
	let code = code_response.access_code.expect("authorize_code_request should mint a code.");

	println!("issued access code: {}", code.expose());

	let (ctx, authorization) = engine
		.authorize_code_grant("demo-client", Some("demo-secret"), code.expose(), &redirect_uri, ctx)
		.await?;
	let (_ctx, token_response) = engine.issue_token(authorization, ctx).await?;

	println!(
		"access_token={} scope={}",
		token_response.access_token.expect("Code exchange should mint an access token.").expose(),
		token_response.scope.normalized(),
	);

	Ok(())
}
