//! Page source stubs and mock device servers.

use async_trait::async_trait;
use mockito::{Mock, Server, ServerGuard};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::envoy::{Page, PageSource};
use crate::error::FetchError;

/// Scripted [`PageSource`] that records how often each page was requested.
///
/// Pages without a scripted response answer with status 503.
#[derive(Debug, Default)]
pub struct StubSource {
    responses: Mutex<HashMap<Page, Result<String, u16>>>,
    calls: Mutex<HashMap<Page, usize>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(self, page: Page, body: impl Into<String>) -> Self {
        self.set_body(page, body);
        self
    }

    pub fn set_body(&self, page: Page, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(page, Ok(body.into()));
    }

    pub fn set_status(&self, page: Page, status: u16) {
        self.responses.lock().unwrap().insert(page, Err(status));
    }

    pub fn calls(&self, page: Page) -> usize {
        self.calls.lock().unwrap().get(&page).copied().unwrap_or(0)
    }
}

#[async_trait]
impl PageSource for StubSource {
    async fn fetch(&self, page: Page) -> Result<String, FetchError> {
        *self.calls.lock().unwrap().entry(page).or_insert(0) += 1;

        let response = self.responses.lock().unwrap().get(&page).cloned();
        match response {
            Some(Ok(body)) => Ok(body),
            Some(Err(status)) => Err(FetchError::Status {
                status,
                message: "stub failure".to_string(),
            }),
            None => Err(FetchError::Status {
                status: 503,
                message: "no stub response".to_string(),
            }),
        }
    }
}

/// Builder for a mockito server standing in for the device.
pub struct MockEnvoyServerBuilder {
    server: ServerGuard,
    mocks: Vec<Mock>,
}

impl MockEnvoyServerBuilder {
    pub async fn new() -> Self {
        Self {
            server: Server::new_async().await,
            mocks: Vec::new(),
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Serves `body` for `page`, expecting exactly `hits` requests.
    pub async fn mock_page(mut self, page: Page, body: &str, hits: usize) -> Self {
        let mock = self
            .server
            .mock("GET", format!("/{}", page.path()).as_str())
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await;
        self.mocks.push(mock);
        self
    }

    /// Answers `page` with `status`, expecting exactly `hits` requests.
    pub async fn mock_failure(mut self, page: Page, status: usize, hits: usize) -> Self {
        let mock = self
            .server
            .mock("GET", format!("/{}", page.path()).as_str())
            .with_status(status)
            .with_body("Service Unavailable")
            .expect(hits)
            .create_async()
            .await;
        self.mocks.push(mock);
        self
    }

    /// Verifies every mock saw its expected number of requests.
    pub async fn assert(&self) {
        for mock in &self.mocks {
            mock.assert_async().await;
        }
    }
}
