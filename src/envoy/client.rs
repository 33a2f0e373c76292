use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::sync::Arc;

use crate::config::EnvoyConfig;
use crate::envoy::page::Page;
use crate::error::FetchError;

/// Something that can deliver the HTML body of an Envoy page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, page: Page) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for Arc<T> {
    async fn fetch(&self, page: Page) -> Result<String, FetchError> {
        (**self).fetch(page).await
    }
}

/// HTTP client for the Envoy web interface.
pub struct Client {
    http_client: HttpClient,
    base_url: String,
}

impl Client {
    pub fn new(config: &EnvoyConfig) -> Result<Self, FetchError> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http_client,
            base_url: config.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str) -> Result<String, FetchError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .http_client
            .get(&url)
            .header("user-agent", "reqwest")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(FetchError::status(status, body))
        }
    }
}

#[async_trait]
impl PageSource for Client {
    async fn fetch(&self, page: Page) -> Result<String, FetchError> {
        self.get(page.path()).await
    }
}
