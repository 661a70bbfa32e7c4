//! Token validation against `GET /user`
//!
//! GitHub API docs: https://docs.github.com/en/rest/users/users#get-the-authenticated-user

use crate::github::{
    auth::{AuthHeaders, TokenKind},
    client::{
        normalize_base_url, GithubClientError, Transport, DEFAULT_BASE_URL, HEADER_OAUTH_SCOPES,
    },
    user::AuthenticatedUser,
};
use log::{debug, warn};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why a token was not accepted
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// The request never produced a response: connection failure, timeout, or a
    /// token that can't be put in a header
    #[error("{0}")]
    Transport(String),

    /// GitHub answered with a non-success status
    #[error("{message}")]
    AuthRejected { status: u16, message: String },

    /// A classic token was accepted but lacks scopes we need
    #[error("Token missing required scopes: {}", .missing.join(", "))]
    InsufficientScope { missing: Vec<String> },

    /// GitHub answered successfully but not with a user
    #[error("Token validation failed: {0}")]
    InvalidResponse(String),
}

/// Outcome of a single validation. Never cached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub username: Option<String>,
    pub scopes: Vec<String>,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<ValidationError>,
}

impl ValidationResult {
    fn success(username: String, scopes: Vec<String>) -> Self {
        Self {
            valid: true,
            username: Some(username),
            scopes,
            error: None,
        }
    }

    fn failure(error: ValidationError) -> Self {
        Self {
            valid: false,
            username: None,
            scopes: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Human readable reason the token was rejected
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Scopes the token would need in addition to the ones it has
    pub fn missing_scopes(&self) -> &[String] {
        match &self.error {
            Some(ValidationError::InsufficientScope { missing }) => missing,
            _ => &[],
        }
    }
}

fn serialize_error<S: Serializer>(
    error: &Option<ValidationError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(error) => serializer.serialize_some(&error.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Parse the `X-OAuth-Scopes` header, eg `"repo, read:user"`
pub fn parse_scopes(header: Option<&str>) -> Vec<String> {
    header
        .map(|scopes| {
            scopes
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn missing_scopes(required: &[&str], granted: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|scope| !granted.iter().any(|g| g == *scope))
        .map(|scope| (*scope).to_owned())
        .collect()
}

/// Checks tokens against GitHub's "current user" endpoint
#[derive(Clone, Debug)]
pub struct TokenValidator<T> {
    transport: T,

    /// Must always be terminated with a trailing slash
    base_url: String,
}

impl<T: Transport> TokenValidator<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    /// Point at a different API root, eg a GitHub Enterprise instance
    pub fn with_base_url<S: AsRef<str>>(mut self, base_url: S) -> Self {
        self.base_url = normalize_base_url(base_url.as_ref());
        self
    }

    /// Issue one `GET /user` with `token` and report whether GitHub accepts
    /// it. Every failure is folded into the returned result.
    pub async fn validate(&self, token: &str, kind: TokenKind) -> ValidationResult {
        let url = format!("{}user", self.base_url);
        debug!("validating {} token against {}", kind, url);

        let result = match self.check(&url, token, kind).await {
            Ok(result) => result,
            Err(error) => ValidationResult::failure(error),
        };

        match &result.error {
            Some(error) => warn!("{} token rejected: {}", kind, error),
            None => debug!(
                "{} token valid for {}",
                kind,
                result.username.as_deref().unwrap_or_default()
            ),
        }

        result
    }

    async fn check(
        &self,
        url: &str,
        token: &str,
        kind: TokenKind,
    ) -> Result<ValidationResult, ValidationError> {
        let headers = AuthHeaders::rest(token, kind)
            .to_header_map()
            .map_err(|e| ValidationError::Transport(e.to_string()))?;

        let response = self
            .transport
            .get(url, &headers)
            .await
            .map_err(|e| ValidationError::Transport(e.to_string()))?;

        if !response.status.is_success() {
            let message = GithubClientError::message_from_body(&response.body)
                .unwrap_or_else(|| "Invalid token".to_owned());
            return Err(ValidationError::AuthRejected {
                status: response.status.as_u16(),
                message,
            });
        }

        let scopes = parse_scopes(response.header(HEADER_OAUTH_SCOPES));
        let missing = missing_scopes(kind.required_scopes(), &scopes);
        if !missing.is_empty() {
            return Ok(ValidationResult {
                valid: false,
                username: None,
                scopes,
                error: Some(ValidationError::InsufficientScope { missing }),
            });
        }

        let user: AuthenticatedUser = serde_json::from_slice(&response.body)
            .map_err(|e| ValidationError::InvalidResponse(e.to_string()))?;

        Ok(ValidationResult::success(user.login, scopes))
    }
}
