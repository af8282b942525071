use reqwest::{
    header::{ACCEPT, USER_AGENT},
    Client, RequestBuilder, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{ops::Deref, time::Duration};
use thiserror::Error;

const GITHUB_API_VERSION: &str = "2022-11-28";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Self {
        HttpClient {
            client: Client::new(),
        }
    }

    /// Builds a client whose requests give up after `timeout`.
    /// `None` keeps the transport default, which never times out.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, Error> {
        let mut builder = Client::builder();

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|cause| Error::BuildClientError { cause })?;

        Ok(HttpClient { client })
    }

    pub async fn execute(&self, request: RequestBuilder) -> Result<ApiResponse, Error> {
        let response = request
            .send()
            .await
            .map_err(|cause| Error::RequestError { cause })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|cause| Error::ReadResponseTextError { cause })?;

        Ok(ApiResponse { status, body })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for HttpClient {
    type Target = Client;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

pub trait Headers {
    fn github_headers(self, token: &str) -> RequestBuilder;
}

impl Headers for RequestBuilder {
    fn github_headers(self, token: &str) -> RequestBuilder {
        self.bearer_auth(token)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .header(USER_AGENT, USER_AGENT_VALUE)
    }
}

/// A fully read response. Non-2xx statuses are data here, not errors.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn json<T>(&self) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(&self.body).map_err(|cause| Error::ParseResponseError { cause })
    }

    /// Parsed body, or the raw text as a JSON string when the body is not JSON.
    pub fn json_or_text(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|_| Value::String(self.body.to_owned()))
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid api url {url}")]
    InvalidUrlError { url: String },
    #[error("Failed to build the http client")]
    BuildClientError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to send request")]
    RequestError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to read response text")]
    ReadResponseTextError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to parse response")]
    ParseResponseError {
        #[source]
        cause: serde_json::Error,
    },
}
