use github_token_auth::{github::TokenKind, Config, Error, ValidationResult};
use log::{error, info};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "github-token-check")]
/// Check that a GitHub personal access token is accepted and carries the
/// permissions we need
struct Options {
    #[structopt(short, long, parse(from_os_str))]
    /// config file to use
    config: Option<PathBuf>,

    #[structopt(long)]
    /// token to validate, overrides the config file
    token: Option<String>,

    #[structopt(long, possible_values = &["classic", "fine-grained"])]
    /// kind of token, overrides the config file
    kind: Option<TokenKind>,

    #[structopt(long)]
    /// GitHub API root, eg for GitHub Enterprise
    base_url: Option<String>,

    #[structopt(long)]
    /// print the result as json
    json: bool,
}

impl Options {
    fn config(&self) -> Result<Config, Error> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(token) = &self.token {
            config.token = Some(token.clone());
        }
        if let Some(kind) = self.kind {
            config.kind = kind;
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let opts = Options::from_args();

    // set up logging, allowing info level logging by default
    env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = opts.config()?;
    let authenticator = config.authenticator()?;
    let transport = config.transport()?;

    info!(
        "validating {} token against {}",
        authenticator.kind(),
        authenticator.base_url()
    );

    let result = authenticator.validate(&transport).await;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.is_valid() {
        println!("{}", describe(&result));
    } else {
        error!("token is invalid: {}", result.error_message().unwrap_or_default());
        eprintln!("{}", describe(&result));
    }

    let code = exit_code(&result);
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

/// Human readable summary of a validation, one line per fact
fn describe(result: &ValidationResult) -> String {
    if result.is_valid() {
        let scopes = if result.scopes.is_empty() {
            "none reported".to_owned()
        } else {
            result.scopes.join(", ")
        };
        return format!(
            "token is valid for {} (scopes: {})",
            result.username.as_deref().unwrap_or_default(),
            scopes
        );
    }

    let mut out = format!(
        "token is invalid: {}",
        result.error_message().unwrap_or_default()
    );
    if !result.missing_scopes().is_empty() {
        out.push_str(&format!("\nmissing scopes: {}", result.missing_scopes().join(", ")));
    }
    out
}

fn exit_code(result: &ValidationResult) -> i32 {
    if result.is_valid() {
        0
    } else {
        1
    }
}
