use anyhow::{Context, Result};
use gh_seed::{
    config::{self, Config},
    create_repository, logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().await.context("Cannot load config file")?;
    logger::init(config.log_level)?;

    let repository = config
        .repository
        .as_ref()
        .context("The config file has no `repository` section")?;

    let client = config
        .client(config::load_token())
        .context("Cannot create the github client")?;

    log::info!("Starting");
    let result = create_repository(
        &client,
        &repository.name,
        &repository.description,
        repository.private,
        repository.owner.as_deref(),
    )
    .await;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
