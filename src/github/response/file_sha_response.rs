use serde::Deserialize;

/// The part of a contents API entry needed to overwrite it.
#[derive(Debug, Deserialize)]
pub struct FileShaResponse {
    pub sha: String,
}
