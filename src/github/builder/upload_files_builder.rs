use super::{create_repository_builder::MISSING_TOKEN_MESSAGE, BuilderExecutor};
use crate::github::{
    content::UploadRequest, github_client::GithubClient, outcome::BatchResult,
    outcome::UploadOutcome, request::UpsertFileRequest,
};
use anyhow::{bail, Context, Result};
use serde_json::Value;

pub const DEFAULT_COMMIT_MESSAGE: &str = "Automated file upload";
pub const DEFAULT_BRANCH: &str = "main";

pub struct UploadFilesBuilder<'a> {
    client: &'a GithubClient,
    owner: String,
    repo: String,
    files: Vec<UploadRequest>,
    commit_message: String,
    branch: String,
}

impl<'a> UploadFilesBuilder<'a> {
    pub fn new(
        client: &'a GithubClient,
        owner: impl Into<String>,
        repo: impl Into<String>,
        files: Vec<UploadRequest>,
    ) -> Self {
        UploadFilesBuilder {
            client,
            owner: owner.into(),
            repo: repo.into(),
            files,
            commit_message: DEFAULT_COMMIT_MESSAGE.to_owned(),
            branch: DEFAULT_BRANCH.to_owned(),
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = message.into();
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    async fn upload(&self, file: &UploadRequest) -> UploadOutcome {
        log::info!("uploading {}", file.path);

        let outcome = match self.try_upload(file).await {
            Ok(outcome) => outcome,
            Err(err) => UploadOutcome::Exception {
                path: file.path.to_owned(),
                error: format!("{:#}", err),
            },
        };

        match &outcome {
            UploadOutcome::Success { .. } => {}
            UploadOutcome::Error { status_code, .. } => {
                log::warn!("failed to upload {}: status {}", file.path, status_code)
            }
            UploadOutcome::Exception { error, .. } => {
                log::warn!("failed to upload {}: {}", file.path, error)
            }
        }

        outcome
    }

    async fn try_upload(&self, file: &UploadRequest) -> Result<UploadOutcome> {
        if !self.client.has_token() {
            bail!(MISSING_TOKEN_MESSAGE);
        }

        if file.path.trim().is_empty() {
            bail!("File path is empty");
        }

        let content = file
            .encoded_content()
            .with_context(|| format!("Cannot encode content as {}", file.encoding))?;

        let sha = self
            .client
            .get_file_sha(&self.owner, &self.repo, &file.path, &self.branch)
            .await
            .context("Cannot check whether the file exists")?;

        if sha.is_some() {
            log::debug!("updating file {}", file.path);
        } else {
            log::debug!("creating new file {}", file.path);
        }

        let request = UpsertFileRequest::new(&self.commit_message, content, &self.branch, sha);

        let response = self
            .client
            .upsert_file(&self.owner, &self.repo, &file.path, &request)
            .await
            .context("Cannot upload the file")?;

        let outcome = match response.status_code() {
            200 | 201 => UploadOutcome::Success {
                path: file.path.to_owned(),
                response: response
                    .json::<Value>()
                    .context("Invalid upload response")?,
            },
            status_code => UploadOutcome::Error {
                path: file.path.to_owned(),
                status_code,
                error: response.json_or_text(),
            },
        };

        Ok(outcome)
    }
}

impl BuilderExecutor for UploadFilesBuilder<'_> {
    type Output = BatchResult;

    async fn execute(self) -> BatchResult {
        let mut outcomes = Vec::with_capacity(self.files.len());

        for file in &self.files {
            outcomes.push(self.upload(file).await);
        }

        let result: BatchResult = outcomes.into_iter().collect();

        log::info!(
            "uploaded {} of {} files to {}/{}",
            result.total,
            self.files.len(),
            self.owner,
            self.repo
        );

        result
    }
}
