//! Whole-document exchange between a client and the sheet server.
//!
//! The wire protocol has exactly two document verbs: fetch the full sheet and
//! replace the full sheet. [`SheetClient`] speaks it over HTTP;
//! [`DocumentStore`] implements the same trait in-process.

use std::future::Future;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::MessageResponse;
use crate::config::ClientConfig;
use crate::models::Sheet;
use crate::store::DocumentStore;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Sync worker is no longer running")]
    Disconnected,
}

/// Fetch-the-whole-document / replace-the-whole-document exchange.
pub trait SheetTransport: Send + Sync + 'static {
    /// Current full sheet as stored server-side.
    fn fetch_document(&self) -> impl Future<Output = Result<Sheet, TransportError>> + Send;

    /// Replace the server's document in its entirety.
    fn submit_document(
        &self,
        sheet: &Sheet,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// HTTP client for the sheet API.
#[derive(Debug, Clone)]
pub struct SheetClient {
    base_url: String,
    client: Client,
}

impl SheetClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        Self::from_config(&ClientConfig::from_env())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    /// Create with an explicit base URL such as `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert non-2xx responses into `TransportError::Status`.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(TransportError::Status { status, body })
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Liveness probe against `GET /`.
    pub async fn ping(&self) -> Result<String, TransportError> {
        let response = self.client.get(self.url("/")).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.text().await?)
    }
}

impl SheetTransport for SheetClient {
    async fn fetch_document(&self) -> Result<Sheet, TransportError> {
        let response = self.client.get(self.url("/api/sheet")).send().await?;
        Self::handle_response(response).await
    }

    async fn submit_document(&self, sheet: &Sheet) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.url("/api/sheet"))
            .json(sheet)
            .send()
            .await?;
        let ack: MessageResponse = Self::handle_response(response).await?;
        tracing::debug!("Server acknowledged sheet: {}", ack.message);
        Ok(())
    }
}

/// Loopback transport: talk to a store in the same process.
impl SheetTransport for DocumentStore {
    async fn fetch_document(&self) -> Result<Sheet, TransportError> {
        Ok(self.get())
    }

    async fn submit_document(&self, sheet: &Sheet) -> Result<(), TransportError> {
        self.replace(sheet.clone());
        Ok(())
    }
}
