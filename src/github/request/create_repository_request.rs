use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CreateRepositoryRequest {
    pub name: String,
    pub description: String,
    pub private: bool,
    pub auto_init: bool,
}

impl CreateRepositoryRequest {
    pub fn new(name: impl Into<String>, description: impl Into<String>, private: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            private,
            auto_init: true,
        }
    }
}
