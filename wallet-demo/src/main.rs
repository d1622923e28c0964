use std::{net::SocketAddr, sync::Arc};

use ctoken_cookbook::config::{default_keypair_path, load_keypair};
use ctoken_wallet_demo::{
    config::DemoConfig,
    server::{routes, AppState},
    signer::{LocalSigner, RemoteSigner, TransactionSigner},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = DemoConfig::from_env()?;

    let signer: Arc<dyn TransactionSigner> = match &config.wallet_service {
        Some(service) => {
            tracing::info!(wallet = %service.wallet_address, "using remote wallet service");
            Arc::new(RemoteSigner::new(service.clone()))
        }
        None => {
            let path = match &config.keypair_path {
                Some(path) => path.clone(),
                None => default_keypair_path()?,
            };
            let keypair = load_keypair(&path)?;
            let signer = LocalSigner::new(keypair);
            tracing::info!(wallet = %signer.address(), "using local keypair");
            Arc::new(signer)
        }
    };

    let port = config.port;
    let state = Arc::new(AppState { config, signer });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!(%addr, "wallet demo listening");
    warp::serve(routes(state)).run(addr).await;
    Ok(())
}
