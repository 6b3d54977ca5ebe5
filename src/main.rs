//! cafe-api entry point
//!
//! Usage:
//!   cafe-api --api-key <secret>            # serve on 127.0.0.1:3030
//!   CAFE_API_KEY=<secret> cafe-api -p 8080
//!   RUST_LOG=cafe_api=debug cafe-api ...   # fine-grained log control

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cafe_api::{run_server, ServerArgs};

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    init_tracing()?;
    run_server(args).await
}
