use anyhow::{Context, Result};
use gh_seed::{
    config::{self, Config},
    logger, requests_from_directory, upload_files,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().await.context("Cannot load config file")?;
    logger::init(config.log_level)?;

    let upload = config
        .upload
        .as_ref()
        .context("The config file has no `upload` section")?;

    let client = config
        .client(config::load_token())
        .context("Cannot create the github client")?;

    log::info!("Collecting files from {}", upload.local_dir.display());
    let files = requests_from_directory(&upload.local_dir, &upload.remote_prefix)
        .context("Cannot collect the files to upload")?;

    log::info!("Uploading to {}/{}", upload.owner, upload.repo);
    let result = upload_files(
        &client,
        &upload.owner,
        &upload.repo,
        files,
        &upload.commit_message,
        &upload.branch,
    )
    .await;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
