use super::BuilderExecutor;
use crate::github::{
    github_client::GithubClient, outcome::RepoCreationResult, request::CreateRepositoryRequest,
};
use anyhow::{Context, Result};
use serde_json::Value;

pub const MISSING_TOKEN_MESSAGE: &str = "A GitHub personal access token is required";
const MISSING_NAME_MESSAGE: &str = "A repository name is required";
const CREATED_MESSAGE: &str = "Repository created successfully";
const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

pub struct CreateRepositoryBuilder<'a> {
    client: &'a GithubClient,
    name: String,
    description: String,
    private: bool,
    owner: Option<String>,
}

impl<'a> CreateRepositoryBuilder<'a> {
    pub fn new(client: &'a GithubClient, name: impl Into<String>) -> Self {
        CreateRepositoryBuilder {
            client,
            name: name.into(),
            description: String::new(),
            private: false,
            owner: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Organization that will own the repository. Empty means the authenticated user.
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into()).filter(|owner| !owner.trim().is_empty());
        self
    }

    async fn send(&self) -> Result<RepoCreationResult> {
        let request = CreateRepositoryRequest::new(&self.name, &self.description, self.private);

        let response = self
            .client
            .create_repository(self.owner.as_deref(), &request)
            .await?;

        let data = response
            .json::<Value>()
            .context("Invalid repository creation response")?;

        if response.status_code() == 201 {
            return Ok(RepoCreationResult::Success {
                message: CREATED_MESSAGE.to_owned(),
                data,
            });
        }

        let message = data
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_ERROR_MESSAGE)
            .to_owned();

        Ok(RepoCreationResult::Failure {
            message,
            status_code: Some(response.status_code()),
            data: Some(data),
        })
    }
}

impl BuilderExecutor for CreateRepositoryBuilder<'_> {
    type Output = RepoCreationResult;

    async fn execute(self) -> RepoCreationResult {
        if !self.client.has_token() {
            log::warn!("not creating {}: no access token", self.name);
            return RepoCreationResult::failure(MISSING_TOKEN_MESSAGE);
        }

        if self.name.trim().is_empty() {
            return RepoCreationResult::failure(MISSING_NAME_MESSAGE);
        }

        log::info!("creating repository {}", self.name);

        let result = match self.send().await {
            Ok(result) => result,
            Err(err) => RepoCreationResult::failure(format!(
                "Exception while creating the repository: {:#}",
                err
            )),
        };

        if !result.is_success() {
            log::warn!("failed to create {}: {}", self.name, result.message());
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn should_create_user_repository() -> Result<()> {
        let mut server = Server::new_async().await;
        let client = GithubClient::new("token").with_api_url(server.url());

        let mock = server
            .mock("POST", "/user/repos")
            .match_header("authorization", "Bearer token")
            .match_body(Matcher::Json(json!({
                "name": "repo1",
                "description": "Created through the API",
                "private": false,
                "auto_init": true
            })))
            .with_status(201)
            .with_body(r#"{"id":1,"name":"repo1","full_name":"octo/repo1"}"#)
            .create_async()
            .await;

        let result = client
            .create_repo("repo1")
            .description("Created through the API")
            .execute()
            .await;

        mock.assert_async().await;
        assert_eq!(
            result,
            RepoCreationResult::Success {
                message: CREATED_MESSAGE.to_owned(),
                data: json!({"id": 1, "name": "repo1", "full_name": "octo/repo1"}),
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn should_target_organization_when_owner_is_set() -> Result<()> {
        let mut server = Server::new_async().await;
        let client = GithubClient::new("token").with_api_url(server.url());

        let mock = server
            .mock("POST", "/orgs/acme/repos")
            .match_body(Matcher::PartialJson(json!({"name": "tools", "private": true})))
            .with_status(201)
            .with_body(r#"{"name":"tools"}"#)
            .create_async()
            .await;

        let result = client
            .create_repo("tools")
            .private(true)
            .owner("acme")
            .execute()
            .await;

        mock.assert_async().await;
        assert!(result.is_success());

        Ok(())
    }

    #[tokio::test]
    async fn should_treat_empty_owner_as_user() -> Result<()> {
        let mut server = Server::new_async().await;
        let client = GithubClient::new("token").with_api_url(server.url());

        let mock = server
            .mock("POST", "/user/repos")
            .with_status(201)
            .with_body("{}")
            .create_async()
            .await;

        let result = client.create_repo("repo1").owner("").execute().await;

        mock.assert_async().await;
        assert!(result.is_success());

        Ok(())
    }

    #[tokio::test]
    async fn should_report_existing_repository() -> Result<()> {
        let mut server = Server::new_async().await;
        let client = GithubClient::new("token").with_api_url(server.url());

        let body = json!({
            "message": "Repository creation failed.",
            "errors": [{"resource": "Repository", "field": "name", "message": "name already exists on this account"}]
        });

        let mock = server
            .mock("POST", "/user/repos")
            .with_status(422)
            .with_body(body.to_string())
            .create_async()
            .await;

        let result = client.create_repo("repo1").execute().await;

        mock.assert_async().await;
        assert_eq!(
            result,
            RepoCreationResult::Failure {
                message: "Repository creation failed.".to_owned(),
                status_code: Some(422),
                data: Some(body),
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn should_fall_back_when_error_has_no_message() -> Result<()> {
        let mut server = Server::new_async().await;
        let client = GithubClient::new("token").with_api_url(server.url());

        let _mock = server
            .mock("POST", "/user/repos")
            .with_status(500)
            .with_body("{}")
            .create_async()
            .await;

        let result = client.create_repo("repo1").execute().await;

        assert_eq!(result.message(), UNKNOWN_ERROR_MESSAGE);

        Ok(())
    }

    #[tokio::test]
    async fn should_not_call_api_without_token() -> Result<()> {
        let mut server = Server::new_async().await;
        let client = GithubClient::new("").with_api_url(server.url());

        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let result = client.create_repo("repo1").execute().await;

        mock.assert_async().await;
        assert_eq!(result, RepoCreationResult::failure(MISSING_TOKEN_MESSAGE));

        Ok(())
    }

    #[tokio::test]
    async fn should_convert_transport_errors_into_failure() -> Result<()> {
        let client = GithubClient::new("token").with_api_url("http://127.0.0.1:1");

        let result = client.create_repo("repo1").execute().await;

        assert!(!result.is_success());
        assert!(result
            .message()
            .starts_with("Exception while creating the repository"));

        Ok(())
    }
}
