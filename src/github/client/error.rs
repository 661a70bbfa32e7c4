//! Error type for Github Client

use serde::Deserialize;
use std::{borrow::Cow, str};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),

    #[error("{0}")]
    Message(Cow<'static, str>),
}

impl From<&'static str> for Error {
    fn from(error: &'static str) -> Self {
        Error::Message(error.into())
    }
}

impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::Message(error.into())
    }
}

// Github Error Responses
// https://developer.github.com/v3/#client-errors
#[derive(Debug, Deserialize)]
pub struct GithubClientError {
    pub message: Option<String>,
    pub documentation_url: Option<String>,
}

impl GithubClientError {
    /// Pull the `message` field out of an error payload, if there is one
    pub fn message_from_body(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<GithubClientError>(body)
            .ok()
            .and_then(|e| e.message)
            .filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod test {
    use super::GithubClientError;

    #[test]
    fn message_from_body() {
        let body =
            br#"{"message":"Bad credentials","documentation_url":"https://docs.github.com/rest"}"#;
        assert_eq!(
            GithubClientError::message_from_body(body).as_deref(),
            Some("Bad credentials")
        );
    }

    #[test]
    fn message_missing_or_garbage() {
        assert_eq!(GithubClientError::message_from_body(b"{}"), None);
        assert_eq!(GithubClientError::message_from_body(br#"{"message":""}"#), None);
        assert_eq!(GithubClientError::message_from_body(b"<html>"), None);
    }
}
