use std::{borrow::Cow, io, str};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Io error")]
    Io(#[from] io::Error),
    #[error("toml parsing error")]
    Toml(#[from] toml::de::Error),
    #[error("json error")]
    Json(#[from] serde_json::Error),
    #[error("github client error: {0}")]
    Client(#[from] crate::github::client::Error),
    #[error("`{0}`")]
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
