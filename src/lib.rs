mod config;
mod error;
pub mod github;

pub use config::Config;
pub use error::{Error, Result};
pub use github::{
    AuthHeaders, ClientConfig, TokenAuthenticator, TokenKind, TokenValidator, ValidationError,
    ValidationResult,
};
