mod config;
mod github_api_utils;
mod repository;
mod search_utils;
mod server;

use config::Config;
use dotenv::dotenv;

extern crate pretty_env_logger;
#[macro_use]
extern crate log;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // load env variables
    dotenv().ok();
    pretty_env_logger::init();

    let config = Config::from_env()?;
    if config.github_token.is_none() {
        warn!("GITHUB_TOKEN not set, github requests are unauthenticated");
    }
    if let Err(err) = server::run(&config).await {
        error!("{err}");
        return Err(err);
    }
    Ok(())
}
