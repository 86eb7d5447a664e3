//! Directory clients for the API gateway.
//!
//! Two collaborator traits keep the transfer view testable without a
//! network: [`CommitmentDirectory`] lists and spends commitments,
//! [`UserDirectory`] lists registered recipient names. The gateway
//! serves all three routes, so one [`HttpDirectoryClient`] implements
//! both traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use veilpay_core::{DirectoryConfig, HttpDirectoryClient, CommitmentDirectory};
//!
//! let client = HttpDirectoryClient::new(DirectoryConfig::localhost())?;
//! let listing = client.get_commitments().await?;
//! println!("{} commitments", listing.data.len());
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::DirectoryConfig;
use crate::errors::DirectoryError;
use crate::models::{Commitment, Envelope, TransferRequest, User};

/// Route serving the commitment list.
const COMMITMENTS_PATH: &str = "ft-commitment";
/// Route accepting transfer submissions.
const TRANSFER_PATH: &str = "ft-commitment/transfer";
/// Route serving the registered-name list.
const USERS_PATH: &str = "user";

/// Supplies the commitment list and performs the transfer operation.
#[async_trait]
pub trait CommitmentDirectory: Send + Sync {
    /// Fetch all commitments held by the current user.
    async fn get_commitments(&self) -> Result<Envelope<Vec<Commitment>>, DirectoryError>;

    /// Submit a commitment transfer. The split is assumed atomic on the
    /// gateway side; there is no partial-failure recovery here.
    async fn transfer(&self, request: &TransferRequest) -> Result<(), DirectoryError>;
}

/// Supplies the registered recipient names.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch all registered users.
    async fn get_registered_names(&self) -> Result<Envelope<Vec<User>>, DirectoryError>;
}

/// HTTP client for the API gateway.
pub struct HttpDirectoryClient {
    config: DirectoryConfig,
    client: reqwest::Client,
}

impl HttpDirectoryClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DirectoryError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create a client for a gateway on the local machine.
    pub fn localhost() -> Result<Self, DirectoryError> {
        Self::new(DirectoryConfig::localhost())
    }

    /// Get the configuration.
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Build the full URL for a gateway route.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DirectoryError> {
        let url = self.url(path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(path, e))?;

        self.handle_response(path, response).await
    }

    /// Make a POST request with a JSON body, discarding the response body
    /// on success.
    async fn post_json<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), DirectoryError> {
        let url = self.url(path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(path, e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(self.map_status_error(path, status.as_u16(), &text));
        }

        Ok(())
    }

    /// Handle an HTTP response, parsing JSON or returning an error.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, DirectoryError> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(self.map_status_error(path, status.as_u16(), &error_text));
        }

        response.json::<T>().await.map_err(|e| {
            DirectoryError::Serialization(format!("Failed to parse gateway response: {}", e))
        })
    }

    /// Map HTTP status codes to DirectoryError.
    fn map_status_error(&self, path: &str, status: u16, error_text: &str) -> DirectoryError {
        match status {
            400 => DirectoryError::InvalidData {
                reason: error_text.to_string(),
            },
            404 => DirectoryError::NotFound {
                resource: path.to_string(),
            },
            429 => DirectoryError::RateLimited {
                retry_after_ms: 5000,
            },
            500..=599 => DirectoryError::Server {
                status,
                message: error_text.to_string(),
            },
            _ => DirectoryError::Internal(format!(
                "gateway request to /{} failed ({}): {}",
                path, status, error_text
            )),
        }
    }

    /// Map reqwest errors to DirectoryError.
    fn map_reqwest_error(&self, path: &str, e: reqwest::Error) -> DirectoryError {
        if e.is_timeout() {
            DirectoryError::Timeout {
                operation: format!("request to /{}", path),
                timeout_ms: self.config.timeout_secs * 1000,
            }
        } else if e.is_connect() {
            DirectoryError::Connection {
                target: self.config.api_url.clone(),
                reason: e.to_string(),
            }
        } else {
            DirectoryError::Internal(format!("gateway request to /{} failed: {}", path, e))
        }
    }
}

#[async_trait]
impl CommitmentDirectory for HttpDirectoryClient {
    async fn get_commitments(&self) -> Result<Envelope<Vec<Commitment>>, DirectoryError> {
        self.get(COMMITMENTS_PATH).await
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<(), DirectoryError> {
        self.post_json(TRANSFER_PATH, request).await
    }
}

#[async_trait]
impl UserDirectory for HttpDirectoryClient {
    async fn get_registered_names(&self) -> Result<Envelope<Vec<User>>, DirectoryError> {
        self.get(USERS_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client =
            HttpDirectoryClient::new(DirectoryConfig::new("http://localhost:8001/")).unwrap();
        assert_eq!(
            client.url(COMMITMENTS_PATH),
            "http://localhost:8001/ft-commitment"
        );
        assert_eq!(client.url(USERS_PATH), "http://localhost:8001/user");
    }

    #[test]
    fn test_status_mapping() {
        let client = HttpDirectoryClient::localhost().unwrap();
        assert!(matches!(
            client.map_status_error(USERS_PATH, 404, ""),
            DirectoryError::NotFound { .. }
        ));
        assert!(matches!(
            client.map_status_error(TRANSFER_PATH, 429, ""),
            DirectoryError::RateLimited { .. }
        ));
        assert!(matches!(
            client.map_status_error(TRANSFER_PATH, 502, "bad gateway"),
            DirectoryError::Server { status: 502, .. }
        ));
    }
}
