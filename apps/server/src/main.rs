use std::time::Duration;

use goalpost_server::{
    api::app_router, auth::mint_token, build_state, config::Config, init_tracing,
};

const ISSUED_TOKEN_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // `goalpost-server issue-token <user-id>` prints a bearer token and exits.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [command, user_id] = args.as_slice() {
        if command == "issue-token" {
            let secret = config
                .jwt_secret
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("GP_JWT_SECRET must be set to issue tokens"))?;
            println!("{}", mint_token(secret, user_id, ISSUED_TOKEN_TTL)?);
            return Ok(());
        }
    }

    init_tracing();
    let state = build_state(&config).await?;
    let router = app_router(state, &config)?;
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
