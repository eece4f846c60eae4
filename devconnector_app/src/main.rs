use devconnector_app::{app::App, config::Config, github::GithubClient};

use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::parse();
    let db = devconnector_db::Db::init(&config.database_url).await?;
    let github = GithubClient::from_config(&config)?;

    devconnector_app::serve(App {
        config: Arc::new(config),
        db,
        github,
    })
    .await?;

    Ok(())
}
