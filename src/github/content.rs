use base64::{prelude::BASE64_STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// How `UploadRequest::content` turns into bytes before it is base64 encoded.
/// Names are read with `FromStr`, so they are case-insensitive everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Encoding {
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "ascii")]
    Ascii,
    #[serde(rename = "latin-1")]
    Latin1,
    /// Content is already base64 and is sent as is.
    #[serde(rename = "base64")]
    Base64,
}

impl Encoding {
    pub fn name(&self) -> &str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin-1",
            Encoding::Base64 => "base64",
        }
    }

    pub fn encode(&self, content: &str) -> Result<String, EncodeError> {
        let bytes = match self {
            Encoding::Base64 => return Ok(content.to_owned()),
            Encoding::Utf8 => content.as_bytes().to_vec(),
            Encoding::Ascii => narrow(content, 0x7f, *self)?,
            Encoding::Latin1 => narrow(content, 0xff, *self)?,
        };

        Ok(BASE64_STANDARD.encode(bytes))
    }
}

fn narrow(content: &str, max: u32, encoding: Encoding) -> Result<Vec<u8>, EncodeError> {
    content
        .char_indices()
        .map(|(position, character)| {
            if u32::from(character) <= max {
                Ok(character as u8)
            } else {
                Err(EncodeError::Unencodable {
                    encoding: encoding.name().to_owned(),
                    character,
                    position,
                })
            }
        })
        .collect()
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            "base64" => Ok(Encoding::Base64),
            _ => Err(EncodeError::UnknownEncoding(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Encoding {
    type Error = EncodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),
    #[error("{character:?} at byte {position} cannot be encoded as {encoding}")]
    Unencodable {
        encoding: String,
        character: char,
        position: usize,
    },
}

/// One file to create or update, addressed by its repository-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRequest {
    pub path: String,
    pub content: String,
    #[serde(default)]
    pub encoding: Encoding,
}

impl UploadRequest {
    pub fn new(path: impl Into<String>, content: impl Into<String>, encoding: Encoding) -> Self {
        UploadRequest {
            path: path.into(),
            content: content.into(),
            encoding,
        }
    }

    pub fn text(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(path, content, Encoding::Utf8)
    }

    pub fn base64(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(path, content, Encoding::Base64)
    }

    pub fn encoded_content(&self) -> Result<String, EncodeError> {
        self.encoding.encode(&self.content)
    }
}
