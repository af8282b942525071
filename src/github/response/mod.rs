mod file_sha_response;

pub use file_sha_response::FileShaResponse;
