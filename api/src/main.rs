use std::sync::Arc;

use clap::Parser;
use tracing::info;
use warden_api::{
    application::{
        http::server::http_server::{router, state},
        logging::init_logging,
    },
    args::Args,
};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logging(&args.log);

    let state = state(args.clone()).await?;
    let router = router(state)?;

    let address = format!("{}:{}", args.server.host, args.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, "server listening");

    axum::serve(listener, router).await?;

    Ok(())
}
