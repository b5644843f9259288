use anyhow::{anyhow, Context};

use portico_server::config;
use portico_server::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("reqwest", log::LevelFilter::Warn)
        .init();
    let args: Vec<String> = std::env::args().collect();
    let config = if args.len() > 1 {
        let config = config::load(&args[1])
            .await
            .context(format!("Failed to load config from {}", args[1]))?;
        if let Some(f) = args.get(2) {
            return Err(anyhow!("Unrecognized flag: {f}"));
        }
        config::validate(&config)
            .map_err(|e| anyhow!("Config validation failed: {e}"))?;
        config
    } else {
        return Err(anyhow::Error::msg(
            "config file must be specified as the first arg",
        ));
    };
    server::run(config).await
}
