use crate::{Error, Result};
use bytes::Bytes;
use reqwest::{Client, Response, StatusCode};
use std::{future::Future, time::Duration};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36";

/// Builds the http client shared by the catalog and the downloader.
///
/// `timeout` bounds every single request, a hung request otherwise stalls the
/// whole batch it belongs to. Nothing is retried either way.
pub fn client(user_agent: &str, timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder()
        .cookie_store(true)
        .user_agent(user_agent);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(Error::Client)
}

/// Source of manifest text and segment bytes.
///
/// Every failure must name the url it happened on.
pub trait Fetch {
    fn text(&self, url: &str) -> impl Future<Output = Result<String>>;

    fn bytes(&self, url: &str) -> impl Future<Output = Result<Bytes>>;
}

/// [`Fetch`] over a [`Client`]. Non success statuses count as failures.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Status code of a GET against `url`, without treating errors as failures.
    pub async fn status(&self, url: &str) -> Result<StatusCode> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|x| Error::network(url, x))?;
        Ok(response.status())
    }

    async fn get(&self, url: &str) -> Result<Response> {
        self.client
            .get(url)
            .send()
            .await
            .and_then(|x| x.error_for_status())
            .map_err(|x| Error::network(url, x))
    }
}

impl Fetch for Fetcher {
    async fn text(&self, url: &str) -> Result<String> {
        self.get(url)
            .await?
            .text()
            .await
            .map_err(|x| Error::network(url, x))
    }

    async fn bytes(&self, url: &str) -> Result<Bytes> {
        self.get(url)
            .await?
            .bytes()
            .await
            .map_err(|x| Error::network(url, x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_url_is_a_network_error_naming_it() {
        let fetcher = Fetcher::new(Client::new());
        let error = fetcher.text("").await.unwrap_err();
        assert!(matches!(&error, Error::Network { url, .. } if url.is_empty()));
        assert!(error.to_string().starts_with("while trying to get ''"));
    }

    #[test]
    fn client_accepts_timeout() {
        assert!(client(DEFAULT_USER_AGENT, Some(Duration::from_secs(5))).is_ok());
    }
}
