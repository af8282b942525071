use serde::Serialize;
use serde_json::Value;

/// Result of uploading a single file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UploadOutcome {
    Success {
        path: String,
        response: Value,
    },
    /// The contents API answered with a non-success status.
    Error {
        path: String,
        status_code: u16,
        error: Value,
    },
    /// The upload never got an answer: bad input, encoding or transport failure.
    Exception {
        path: String,
        error: String,
    },
}

impl UploadOutcome {
    pub fn path(&self) -> &str {
        match self {
            UploadOutcome::Success { path, .. }
            | UploadOutcome::Error { path, .. }
            | UploadOutcome::Exception { path, .. } => path,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub success: bool,
    pub successes: Vec<UploadOutcome>,
    pub failures: Vec<UploadOutcome>,
    pub total: usize,
    pub errors: usize,
}

impl FromIterator<UploadOutcome> for BatchResult {
    fn from_iter<I: IntoIterator<Item = UploadOutcome>>(iter: I) -> Self {
        let (successes, failures): (Vec<_>, Vec<_>) =
            iter.into_iter().partition(UploadOutcome::is_success);

        BatchResult {
            success: failures.is_empty(),
            total: successes.len(),
            errors: failures.len(),
            successes,
            failures,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RepoCreationResult {
    Success {
        message: String,
        data: Value,
    },
    Failure {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },
}

impl RepoCreationResult {
    pub fn failure(message: impl Into<String>) -> Self {
        RepoCreationResult::Failure {
            message: message.into(),
            status_code: None,
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RepoCreationResult::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            RepoCreationResult::Success { message, .. }
            | RepoCreationResult::Failure { message, .. } => message,
        }
    }
}
