pub mod builder;
pub mod content;
pub mod github_client;
pub mod handler;
pub mod outcome;
mod request;
mod response;

use self::{
    builder::BuilderExecutor,
    content::UploadRequest,
    github_client::GithubClient,
    outcome::{BatchResult, RepoCreationResult},
};

/// Creates `name` for the authenticated user, or under the `owner`
/// organization when one is given. Every failure is reported in the result.
pub async fn create_repository(
    client: &GithubClient,
    name: &str,
    description: &str,
    is_private: bool,
    owner: Option<&str>,
) -> RepoCreationResult {
    let mut builder = client
        .create_repo(name)
        .description(description)
        .private(is_private);

    if let Some(owner) = owner {
        builder = builder.owner(owner);
    }

    builder.execute().await
}

/// Creates or updates each file on `branch`, one commit per file, in order.
/// A failing file is recorded in the result and never stops the batch.
pub async fn upload_files(
    client: &GithubClient,
    owner: &str,
    repo: &str,
    files: Vec<UploadRequest>,
    commit_message: &str,
    branch: &str,
) -> BatchResult {
    client
        .repo(owner, repo)
        .upload_files(files)
        .message(commit_message)
        .branch(branch)
        .execute()
        .await
}
