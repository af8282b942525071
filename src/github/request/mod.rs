mod create_repository_request;
mod upsert_file_request;

pub use create_repository_request::CreateRepositoryRequest;
pub use upsert_file_request::UpsertFileRequest;
