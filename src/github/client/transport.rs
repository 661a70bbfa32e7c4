use crate::github::client::{Result, USER_AGENT};
use bytes::Bytes;
use log::debug;
use reqwest::{header::HeaderMap, Client as ReqwestClient, StatusCode};
use std::{fmt::Debug, time::Duration};

/// A response as seen by the token validator: status, headers and the raw body.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Response {
    /// Returns the value of a header as a string, if present and valid utf8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|h| h.to_str().ok())
    }
}

/// Anything that can issue an HTTP GET and hand back status, headers and body.
///
/// Implementations must be reusable across concurrent calls.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<Response>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<Response> {
        (**self).get(url, headers).await
    }
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<Response> {
        (**self).get(url, headers).await
    }
}

#[derive(Debug)]
pub struct TransportBuilder {
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl TransportBuilder {
    pub fn new() -> Self {
        Self {
            user_agent: None,
            timeout: None,
        }
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ReqwestTransport> {
        let user_agent = self.user_agent.unwrap_or_else(|| USER_AGENT.to_owned());

        let mut client_builder = ReqwestClient::builder().user_agent(&user_agent);
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        Ok(ReqwestTransport {
            client: client_builder.build()?,
        })
    }
}

impl Default for TransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `Transport` backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        TransportBuilder::new().build()
    }

    pub fn builder() -> TransportBuilder {
        TransportBuilder::new()
    }

    /// Wrap an already configured client. GitHub rejects requests without a
    /// User-Agent, so the client should set one.
    pub fn from_client(client: ReqwestClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .send()
            .await?;
        debug!("Github Response: {:#?}", response);

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
pub(crate) use mock::MockTransport;

#[cfg(test)]
mod mock {
    use super::{Response, Transport};
    use crate::github::client::{Error, Result};
    use bytes::Bytes;
    use reqwest::{
        header::{HeaderMap, HeaderName, HeaderValue},
        StatusCode,
    };
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    /// A request captured by the mock
    #[derive(Debug, Clone)]
    pub struct Recorded {
        pub url: String,
        pub headers: HeaderMap,
    }

    /// In-memory transport. Replies are handed out in FIFO order; when only one
    /// is left it is repeated, which keeps a backend stable across calls.
    #[derive(Debug, Clone, Default)]
    pub struct MockTransport {
        replies: Arc<Mutex<VecDeque<Result<Response, String>>>>,
        requests: Arc<Mutex<Vec<Recorded>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, status: u16, headers: &[(&str, &str)], body: &str) -> Self {
            let mut map = HeaderMap::new();
            for (name, value) in headers {
                map.insert(
                    HeaderName::from_bytes(name.as_bytes()).unwrap(),
                    HeaderValue::from_str(value).unwrap(),
                );
            }
            let response = Response {
                status: StatusCode::from_u16(status).unwrap(),
                headers: map,
                body: Bytes::from(body.to_owned()),
            };
            self.replies.lock().unwrap().push_back(Ok(response));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(message.to_owned()));
            self
        }

        pub fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Transport for MockTransport {
        async fn get(&self, url: &str, headers: &HeaderMap) -> Result<Response> {
            self.requests.lock().unwrap().push(Recorded {
                url: url.to_owned(),
                headers: headers.clone(),
            });

            let mut replies = self.replies.lock().unwrap();
            let reply = if replies.len() > 1 {
                replies.pop_front()
            } else {
                replies.front().cloned()
            };

            match reply {
                Some(Ok(response)) => Ok(response),
                Some(Err(message)) => Err(Error::Message(message.into())),
                None => Err(format!("no mock reply registered for {}", url).into()),
            }
        }
    }
}
