use crate::{
    github::{
        client::{ReqwestTransport, DEFAULT_BASE_URL},
        TokenAuthenticator, TokenKind,
    },
    Result,
};
use serde::Deserialize;
use std::{fmt, fs, path::Path, time::Duration};

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Token to check. Usually supplied on the command line instead.
    #[serde(default)]
    pub token: Option<String>,

    /// Which kind of token `token` is
    #[serde(default)]
    pub kind: TokenKind,

    /// API root, overridden for GitHub Enterprise
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub user_agent: Option<String>,

    /// Request timeout in seconds. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("kind", &self.kind)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            kind: TokenKind::default(),
            base_url: default_base_url(),
            user_agent: None,
            timeout_secs: None,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn authenticator(&self) -> Result<TokenAuthenticator> {
        let token = self
            .token
            .as_deref()
            .ok_or("no token configured, pass --token or set `token` in the config file")?;

        Ok(TokenAuthenticator::new(token, self.kind).with_base_url(&self.base_url))
    }

    pub fn transport(&self) -> Result<ReqwestTransport> {
        let mut builder = ReqwestTransport::builder();
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod test {
    use super::Config;
    use crate::github::TokenKind;
    use std::time::Duration;

    #[test]
    fn defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.token, None);
        assert_eq!(config.kind, TokenKind::Classic);
        assert_eq!(config.base_url, "https://api.github.com/");
        assert_eq!(config.timeout(), None);
        assert!(config.authenticator().is_err());
    }

    #[test]
    fn full() {
        const CONFIG: &str = r#"
            token = "github_pat_abc"
            kind = "fine-grained"
            base-url = "https://ghe.example.com/api/v3"
            user-agent = "my-tool/1.0"
            timeout-secs = 10
        "#;

        let config: Config = toml::from_str(CONFIG).unwrap();
        assert_eq!(config.kind, TokenKind::FineGrained);
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));

        let authenticator = config.authenticator().unwrap();
        assert_eq!(authenticator.kind(), TokenKind::FineGrained);
        assert_eq!(authenticator.base_url(), "https://ghe.example.com/api/v3/");
        assert_eq!(authenticator.auth_header(), "Bearer github_pat_abc");
        assert!(config.transport().is_ok());
    }

    #[test]
    fn unknown_kind() {
        assert!(toml::from_str::<Config>(r#"kind = "oauth""#).is_err());
    }

    #[test]
    fn from_file() {
        let path = std::env::temp_dir()
            .join(format!("github-token-auth-{}.toml", std::process::id()));
        std::fs::write(&path, "token = \"ghp_abc\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.token.as_deref(), Some("ghp_abc"));
        assert!(Config::from_file(&path).is_err());
    }
}
