//! Authentication headers for GitHub's REST and GraphQL APIs
//!
//! https://docs.github.com/en/rest/overview/authenticating-to-the-rest-api

use crate::github::client::{Result, API_VERSION, HEADER_API_VERSION, MEDIA_TYPE_V3};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The two formats of personal access token GitHub hands out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// Legacy personal access token, sent with the `token` scheme. Carries
    /// OAuth scopes.
    Classic,
    /// Fine-grained personal access token, sent with the `Bearer` scheme
    FineGrained,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Classic => "classic",
            TokenKind::FineGrained => "fine-grained",
        }
    }

    fn scheme(self) -> &'static str {
        match self {
            TokenKind::Classic => "token",
            TokenKind::FineGrained => "Bearer",
        }
    }

    /// Value of the `Authorization` header for `token`
    pub fn authorization(self, token: &str) -> String {
        format!("{} {}", self.scheme(), token)
    }

    /// Scopes a token of this kind must carry. Fine-grained tokens don't
    /// report OAuth scopes so nothing is required of them.
    pub fn required_scopes(self) -> &'static [&'static str] {
        match self {
            TokenKind::Classic => &["read:user", "repo"],
            TokenKind::FineGrained => &[],
        }
    }
}

impl Default for TokenKind {
    fn default() -> Self {
        TokenKind::Classic
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(TokenKind::Classic),
            "fine-grained" => Ok(TokenKind::FineGrained),
            other => Err(format!(
                "unknown token kind `{}`, expected `classic` or `fine-grained`",
                other
            )),
        }
    }
}

/// Ordered set of header name/value pairs.
///
/// Building one never fails and never touches the network; turning it into a
/// `HeaderMap` can fail if the token contains bytes that aren't allowed in a
/// header.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthHeaders {
    headers: Vec<(&'static str, String)>,
}

impl AuthHeaders {
    /// Headers for the REST API
    pub fn rest(token: &str, kind: TokenKind) -> Self {
        let mut headers = vec![
            ("Authorization", kind.authorization(token)),
            ("Accept", MEDIA_TYPE_V3.to_owned()),
        ];
        if kind == TokenKind::FineGrained {
            headers.push((HEADER_API_VERSION, API_VERSION.to_owned()));
        }

        Self { headers }
    }

    /// Headers for the GraphQL API
    pub fn graphql(token: &str, kind: TokenKind) -> Self {
        let mut headers = vec![("authorization", kind.authorization(token))];
        if kind == TokenKind::FineGrained {
            headers.push((HEADER_API_VERSION, API_VERSION.to_owned()));
        }

        Self { headers }
    }

    /// Look up a header, ignoring case
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let mut value = HeaderValue::from_str(value)?;
            if name.eq_ignore_ascii_case("authorization") {
                value.set_sensitive(true);
            }
            map.insert(HeaderName::from_bytes(name.as_bytes())?, value);
        }

        Ok(map)
    }
}

impl fmt::Debug for AuthHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.headers.iter().map(|(name, value)| {
                if name.eq_ignore_ascii_case("authorization") {
                    (*name, "<redacted>")
                } else {
                    (*name, value.as_str())
                }
            }))
            .finish()
    }
}
