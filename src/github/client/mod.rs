use crate::github::auth::AuthHeaders;
use reqwest::Client as ReqwestClient;

mod error;
mod transport;

pub use error::{Error, GithubClientError, Result};
#[cfg(test)]
pub(crate) use transport::MockTransport;
pub use transport::{ReqwestTransport, Response, Transport, TransportBuilder};

// Constants
pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const HEADER_OAUTH_SCOPES: &str = "X-OAuth-Scopes";
pub const HEADER_API_VERSION: &str = "X-GitHub-Api-Version";

pub const MEDIA_TYPE_V3: &str = "application/vnd.github.v3+json";

// https://docs.github.com/en/rest/overview/api-versions
pub const API_VERSION: &str = "2022-11-28";

/// Everything a REST or GraphQL client needs to talk to GitHub with a given
/// token: where to send requests and which headers to attach.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Base URL for REST requests, always terminated with a trailing slash
    pub base_url: String,

    /// GraphQL endpoint
    pub graphql_url: String,

    pub headers: AuthHeaders,
    pub graphql_headers: AuthHeaders,
}

impl ClientConfig {
    pub(crate) fn new(base_url: &str, headers: AuthHeaders, graphql_headers: AuthHeaders) -> Self {
        let base_url = normalize_base_url(base_url);
        let graphql_url = format!("{}graphql", base_url);

        Self {
            base_url,
            graphql_url,
            headers,
            graphql_headers,
        }
    }

    /// Build a `reqwest::Client` which sends the REST headers on every request
    pub fn rest_client(&self) -> Result<ReqwestClient> {
        build_client(&self.headers)
    }

    /// Build a `reqwest::Client` which sends the GraphQL headers on every request
    pub fn graphql_client(&self) -> Result<ReqwestClient> {
        build_client(&self.graphql_headers)
    }
}

fn build_client(headers: &AuthHeaders) -> Result<ReqwestClient> {
    let client = ReqwestClient::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers.to_header_map()?)
        .build()?;

    Ok(client)
}

pub(crate) fn normalize_base_url(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_owned()
    } else {
        format!("{}/", base_url)
    }
}

#[cfg(test)]
mod test {
    use super::{normalize_base_url, DEFAULT_BASE_URL};
    use crate::github::{TokenAuthenticator, TokenKind};

    #[test]
    fn base_url_gets_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://ghe.example.com/api/v3"),
            "https://ghe.example.com/api/v3/"
        );
        assert_eq!(normalize_base_url(DEFAULT_BASE_URL), DEFAULT_BASE_URL);
    }

    #[test]
    fn config_urls() {
        let config = TokenAuthenticator::new("abc", TokenKind::Classic).client_config();
        assert_eq!(config.base_url, "https://api.github.com/");
        assert_eq!(config.graphql_url, "https://api.github.com/graphql");
    }

    #[test]
    fn clients_build_from_config() {
        let config = TokenAuthenticator::new("abc", TokenKind::FineGrained).client_config();
        assert!(config.rest_client().is_ok());
        assert!(config.graphql_client().is_ok());
    }

    #[test]
    fn debug_hides_token() {
        let config = TokenAuthenticator::classic("ghp_secret").client_config();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("application/vnd.github.v3+json"));

        let config = TokenAuthenticator::fine_grained("github_pat_secret").client_config();
        let debug = format!("{:#?}", config);
        assert!(!debug.contains("github_pat_secret"));
        assert!(debug.contains("2022-11-28"));
    }

    #[test]
    fn client_rejects_unsendable_token() {
        let config = TokenAuthenticator::new("abc\ndef", TokenKind::Classic).client_config();
        assert!(config.rest_client().is_err());
    }
}
