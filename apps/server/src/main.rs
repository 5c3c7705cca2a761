use anyhow::Context;
use plint::domain::config::ApiConfig;
use plint::kernel::config::load_config;
use plint_logger::Logger;
use plint_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let _log = Logger::builder(env!("CARGO_PKG_NAME")).with_config(&cfg.logging)?.init()?;

    Server::builder().config(cfg).build().await?.run().await
}
