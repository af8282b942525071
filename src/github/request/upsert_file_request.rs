use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UpsertFileRequest {
    pub message: String,
    pub content: String,
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl UpsertFileRequest {
    pub fn new(
        message: impl Into<String>,
        content: impl Into<String>,
        branch: impl Into<String>,
        sha: Option<String>,
    ) -> Self {
        Self {
            message: message.into(),
            content: content.into(),
            branch: branch.into(),
            sha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_omit_sha_for_new_file() -> Result<(), Box<dyn std::error::Error>> {
        let request = UpsertFileRequest::new("add file", "aGk=", "main", None);

        assert_eq!(
            serde_json::to_value(&request)?,
            json!({"message": "add file", "content": "aGk=", "branch": "main"})
        );

        Ok(())
    }

    #[test]
    fn should_include_sha_for_existing_file() -> Result<(), Box<dyn std::error::Error>> {
        let request = UpsertFileRequest::new("update", "aGk=", "dev", Some("abc".to_owned()));

        assert_eq!(serde_json::to_value(&request)?["sha"], "abc");

        Ok(())
    }
}
