use crate::github::{
    auth::{AuthHeaders, TokenKind},
    client::{normalize_base_url, ClientConfig, Transport, DEFAULT_BASE_URL},
    validate::{TokenValidator, ValidationResult},
};
use std::fmt;

/// A GitHub personal access token together with the scheme it authenticates
/// with.
///
/// Hands out the headers and client configuration needed to talk to GitHub
/// with the token, and can check the token against GitHub on demand. Nothing
/// here performs I/O except `validate`.
#[derive(Clone)]
pub struct TokenAuthenticator {
    token: String,
    kind: TokenKind,
    base_url: String,
}

impl TokenAuthenticator {
    pub fn new<T: Into<String>>(token: T, kind: TokenKind) -> Self {
        Self {
            token: token.into(),
            kind,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    pub fn classic<T: Into<String>>(token: T) -> Self {
        Self::new(token, TokenKind::Classic)
    }

    pub fn fine_grained<T: Into<String>>(token: T) -> Self {
        Self::new(token, TokenKind::FineGrained)
    }

    /// Use a different API root, eg for GitHub Enterprise
    pub fn with_base_url<S: AsRef<str>>(mut self, base_url: S) -> Self {
        self.base_url = normalize_base_url(base_url.as_ref());
        self
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Value for the `Authorization` header
    pub fn auth_header(&self) -> String {
        self.kind.authorization(&self.token)
    }

    pub fn headers(&self) -> AuthHeaders {
        AuthHeaders::rest(&self.token, self.kind)
    }

    pub fn graphql_headers(&self) -> AuthHeaders {
        AuthHeaders::graphql(&self.token, self.kind)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url, self.headers(), self.graphql_headers())
    }

    /// Check the token with a single request through `transport`
    pub async fn validate<T: Transport + ?Sized>(&self, transport: &T) -> ValidationResult {
        TokenValidator::new(transport)
            .with_base_url(&self.base_url)
            .validate(&self.token, self.kind)
            .await
    }
}

impl fmt::Debug for TokenAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthenticator")
            .field("token", &"<redacted>")
            .field("kind", &self.kind)
            .field("base_url", &self.base_url)
            .finish()
    }
}
