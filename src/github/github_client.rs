use super::{
    builder::create_repository_builder::CreateRepositoryBuilder,
    handler::repository_handler::RepositoryHandler,
    request::{CreateRepositoryRequest, UpsertFileRequest},
    response::FileShaResponse,
};
use crate::http::{ApiResponse, Error, Headers, HttpClient};
use reqwest::Url;

pub const GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Clone, Debug)]
pub struct GithubClient {
    http: HttpClient,
    api_url: String,
    token: String,
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> Self {
        GithubClient {
            http: HttpClient::new(),
            api_url: GITHUB_API_URL.to_owned(),
            token: token.into(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_http_client(mut self, http: HttpClient) -> Self {
        self.http = http;
        self
    }

    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    pub fn repo(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> RepositoryHandler<'_> {
        RepositoryHandler::new(self, owner, repo)
    }

    pub fn create_repo(&self, name: impl Into<String>) -> CreateRepositoryBuilder<'_> {
        CreateRepositoryBuilder::new(self, name)
    }

    pub(super) async fn create_repository(
        &self,
        owner: Option<&str>,
        request: &CreateRepositoryRequest,
    ) -> Result<ApiResponse, Error> {
        let uri = match owner {
            Some(owner) => {
                log::debug!("creating repository under organization {}", owner);
                self.api_uri(["orgs", owner, "repos"])?
            }
            None => {
                log::debug!("creating repository under the authenticated user");
                self.api_uri(["user", "repos"])?
            }
        };

        let request = self.http.post(uri).github_headers(&self.token).json(request);

        self.http.execute(request).await
    }

    /// Current revision marker of `path` on `branch`, `None` when the file
    /// cannot be read (usually because it does not exist yet).
    pub(super) async fn get_file_sha(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<Option<String>, Error> {
        let request = self
            .http
            .get(self.contents_uri(owner, repo, path)?)
            .github_headers(&self.token)
            .query(&[("ref", branch)]);

        let response = self.http.execute(request).await?;

        if response.status_code() != 200 {
            log::debug!(
                "no revision found for {} ({})",
                path,
                response.status_code()
            );
            return Ok(None);
        }

        let file = response.json::<FileShaResponse>()?;

        Ok(Some(file.sha))
    }

    pub(super) async fn upsert_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        request: &UpsertFileRequest,
    ) -> Result<ApiResponse, Error> {
        let request = self
            .http
            .put(self.contents_uri(owner, repo, path)?)
            .github_headers(&self.token)
            .json(request);

        self.http.execute(request).await
    }

    fn contents_uri(&self, owner: &str, repo: &str, path: &str) -> Result<Url, Error> {
        let mut url = self.api_uri(["repos", owner, repo, "contents"])?;

        let segments = path.split('/').filter(|segment| !segment.is_empty());
        self.push_segments(&mut url, segments)?;

        Ok(url)
    }

    /// Appends each segment percent-encoded, so `?`, `#` or `%` in a name
    /// stay part of the path.
    fn api_uri<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> Result<Url, Error> {
        let mut url = Url::parse(&self.api_url).map_err(|_| self.invalid_url())?;

        url.path_segments_mut()
            .map_err(|_| self.invalid_url())?
            .pop_if_empty();

        self.push_segments(&mut url, segments)?;

        Ok(url)
    }

    fn push_segments<'s>(
        &self,
        url: &mut Url,
        segments: impl IntoIterator<Item = &'s str>,
    ) -> Result<(), Error> {
        url.path_segments_mut()
            .map_err(|_| self.invalid_url())?
            .extend(segments);

        Ok(())
    }

    fn invalid_url(&self) -> Error {
        Error::InvalidUrlError {
            url: self.api_url.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn should_return_sha_of_existing_file() -> Result<()> {
        let mut server = Server::new_async().await;
        let client = GithubClient::new("token").with_api_url(server.url());

        let mock = server
            .mock("GET", "/repos/owner/repo/contents/docs/readme.md")
            .match_query(Matcher::UrlEncoded("ref".into(), "main".into()))
            .match_header("authorization", "Bearer token")
            .with_status(200)
            .with_body(r#"{"name":"readme.md","path":"docs/readme.md","sha":"3d21ec53a331"}"#)
            .create_async()
            .await;

        let sha = client
            .get_file_sha("owner", "repo", "docs/readme.md", "main")
            .await?;

        mock.assert_async().await;
        assert_eq!(sha.as_deref(), Some("3d21ec53a331"));

        Ok(())
    }

    #[tokio::test]
    async fn should_return_none_for_missing_file() -> Result<()> {
        let mut server = Server::new_async().await;
        let client = GithubClient::new("token").with_api_url(server.url());

        let mock = server
            .mock("GET", "/repos/owner/repo/contents/new.txt")
            .match_query(Matcher::UrlEncoded("ref".into(), "dev".into()))
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let sha = client
            .get_file_sha("owner", "repo", "new.txt", "dev")
            .await?;

        mock.assert_async().await;
        assert!(sha.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn should_fail_when_existing_entry_has_no_sha() -> Result<()> {
        let mut server = Server::new_async().await;
        let client = GithubClient::new("token").with_api_url(server.url());

        let mock = server
            .mock("GET", "/repos/owner/repo/contents/src")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"name":"main.rs","sha":"abc"}]"#)
            .create_async()
            .await;

        let result = client.get_file_sha("owner", "repo", "src", "main").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(Error::ParseResponseError { .. })));

        Ok(())
    }

    #[test]
    fn should_strip_trailing_slash_from_api_url() {
        let client = GithubClient::new("token").with_api_url("https://ghe.example.com/api/v3/");

        assert_eq!(
            client.contents_uri("o", "r", "/a/b.txt").map(String::from).ok(),
            Some("https://ghe.example.com/api/v3/repos/o/r/contents/a/b.txt".to_owned())
        );
    }

    #[test]
    fn should_escape_reserved_characters_in_file_names() {
        let client = GithubClient::new("token");

        assert_eq!(
            client
                .contents_uri("o", "r", "docs/notes?v2 #1 100%.txt")
                .map(String::from)
                .ok(),
            Some(
                "https://api.github.com/repos/o/r/contents/docs/notes%3Fv2%20%231%20100%25.txt"
                    .to_owned()
            )
        );
    }

    #[test]
    fn should_reject_unusable_api_url() {
        let client = GithubClient::new("token").with_api_url("not a url");

        assert!(matches!(
            client.contents_uri("o", "r", "a.txt"),
            Err(Error::InvalidUrlError { .. })
        ));
    }

    #[test]
    fn should_detect_blank_token() {
        assert!(!GithubClient::new("  ").has_token());
        assert!(GithubClient::new("ghp_123").has_token());
    }
}
