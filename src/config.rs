use crate::{
    github::{
        builder::upload_files_builder::{DEFAULT_BRANCH, DEFAULT_COMMIT_MESSAGE},
        github_client::{GithubClient, GITHUB_API_URL},
    },
    http::HttpClient,
};
use anyhow::Result;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{env, path::Path, path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE_NAME: &str = "gh-seed.yaml";
const DEFAULT_ENV_FILE_NAME: &str = ".env";
const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_api_url")]
    pub api_url: String,
    #[serde(default = "Config::default_log_level")]
    pub log_level: LevelFilter,
    pub timeout_secs: Option<u64>,
    pub repository: Option<RepositoryConfig>,
    pub upload: Option<UploadConfig>,
}

impl Config {
    pub async fn load() -> Result<Config> {
        Self::load_from(DEFAULT_CONFIG_FILE_NAME).await
    }

    pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
        let config_string = tokio::fs::read_to_string(path).await?;

        let config = serde_yaml::from_str::<Config>(&config_string)?;

        Ok(config)
    }

    pub fn client(&self, token: Option<String>) -> Result<GithubClient> {
        let http = HttpClient::with_timeout(self.timeout_secs.map(Duration::from_secs))?;

        let client = GithubClient::new(token.unwrap_or_default())
            .with_api_url(&self.api_url)
            .with_http_client(http);

        Ok(client)
    }

    fn default_api_url() -> String {
        GITHUB_API_URL.to_owned()
    }

    fn default_log_level() -> LevelFilter {
        LevelFilter::Info
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub private: bool,
    /// Organization login; leave unset to create under the token's user.
    pub owner: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadConfig {
    pub owner: String,
    pub repo: String,
    pub local_dir: PathBuf,
    #[serde(default)]
    pub remote_prefix: String,
    #[serde(default = "UploadConfig::default_commit_message")]
    pub commit_message: String,
    #[serde(default = "UploadConfig::default_branch")]
    pub branch: String,
}

impl UploadConfig {
    fn default_commit_message() -> String {
        DEFAULT_COMMIT_MESSAGE.to_owned()
    }

    fn default_branch() -> String {
        DEFAULT_BRANCH.to_owned()
    }
}

/// Reads `GITHUB_TOKEN` after merging `.env` from the working directory into
/// the process environment. Variables already set take precedence.
pub fn load_token() -> Option<String> {
    match dotenvy::from_filename(DEFAULT_ENV_FILE_NAME) {
        Ok(path) => log::debug!("loaded environment from {}", path.display()),
        Err(err) if err.not_found() => log::debug!("no {} file found", DEFAULT_ENV_FILE_NAME),
        Err(err) => log::warn!("cannot read {}: {}", DEFAULT_ENV_FILE_NAME, err),
    }

    token_from_env()
}

fn token_from_env() -> Option<String> {
    env::var(TOKEN_ENV_VAR)
        .ok()
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
}
