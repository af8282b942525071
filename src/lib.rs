pub mod config;
pub mod directory;
pub mod github;
pub mod http;
pub mod logger;

pub use directory::requests_from_directory;
pub use github::{
    content::{Encoding, UploadRequest},
    create_repository,
    github_client::GithubClient,
    outcome::{BatchResult, RepoCreationResult, UploadOutcome},
    upload_files,
};
