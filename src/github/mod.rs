//! Token authentication for GitHub's REST (v3) and GraphQL (v4) APIs
//! https://docs.github.com/en/rest
//! https://docs.github.com/en/graphql

mod auth;
mod authenticator;
pub mod client;
mod user;
mod validate;

pub use auth::*;
pub use authenticator::TokenAuthenticator;
pub use client::ClientConfig;
pub use user::*;
pub use validate::*;
