use crate::github::{
    builder::upload_files_builder::UploadFilesBuilder, content::UploadRequest,
    github_client::GithubClient,
};

pub struct RepositoryHandler<'a> {
    client: &'a GithubClient,
    owner: String,
    repo: String,
}

impl<'a> RepositoryHandler<'a> {
    pub fn new(
        client: &'a GithubClient,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        RepositoryHandler {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    pub fn upload_files(&self, files: Vec<UploadRequest>) -> UploadFilesBuilder<'a> {
        UploadFilesBuilder::new(self.client, &self.owner, &self.repo, files)
    }
}
