//! CDN storage zone HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use gfiles_core::config::storage::CdnConfig;
use gfiles_core::error::AppError;
use gfiles_core::result::AppResult;

use crate::types::{CdnEntry, RawEntry};

/// Operations against the CDN storage zone.
///
/// Defined as a trait so services can be exercised against an in-memory
/// implementation in tests.
#[async_trait]
pub trait CdnStorage: Send + Sync + std::fmt::Debug + 'static {
    /// List the entries of a directory.
    ///
    /// Returns `NotFound` when the path does not exist in the zone.
    async fn list(&self, path: &str) -> AppResult<Vec<CdnEntry>>;

    /// Create a folder at the given path. Creating an existing folder is
    /// not an error.
    async fn create_folder(&self, path: &str) -> AppResult<()>;
}

/// HTTP implementation of [`CdnStorage`] against the configured zone.
#[derive(Debug, Clone)]
pub struct CdnStorageClient {
    http: reqwest::Client,
    config: CdnConfig,
}

impl CdnStorageClient {
    /// Create a new client from CDN configuration.
    pub fn new(config: CdnConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// The access key is read at request time: a missing key surfaces as
    /// a configuration error on the call, not at startup.
    fn access_key(&self) -> AppResult<&str> {
        if self.config.access_key.is_empty() {
            return Err(AppError::configuration(
                "CDN storage access key is not configured",
            ));
        }
        Ok(&self.config.access_key)
    }

    fn zone_url(&self, path: &str) -> String {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            format!(
                "{}/{}/",
                self.config.endpoint.trim_end_matches('/'),
                self.config.storage_zone
            )
        } else {
            format!(
                "{}/{}/{}/",
                self.config.endpoint.trim_end_matches('/'),
                self.config.storage_zone,
                trimmed
            )
        }
    }
}

#[async_trait]
impl CdnStorage for CdnStorageClient {
    async fn list(&self, path: &str) -> AppResult<Vec<CdnEntry>> {
        let key = self.access_key()?;
        let url = self.zone_url(path);
        debug!(%url, "Listing CDN directory");

        let response = self
            .http
            .get(&url)
            .header("AccessKey", key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    gfiles_core::error::ErrorKind::ExternalService,
                    "CDN list request failed",
                    e,
                )
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(AppError::not_found(format!(
                "CDN path '{path}' not found"
            ))),
            status if status.is_success() => {
                let raw: Vec<RawEntry> = response.json().await.map_err(|e| {
                    AppError::with_source(
                        gfiles_core::error::ErrorKind::ExternalService,
                        "CDN listing could not be decoded",
                        e,
                    )
                })?;
                Ok(raw.into_iter().map(CdnEntry::from).collect())
            }
            status => Err(AppError::external_service(format!(
                "CDN list returned status {status}"
            ))),
        }
    }

    async fn create_folder(&self, path: &str) -> AppResult<()> {
        let key = self.access_key()?;
        let url = self.zone_url(path);
        debug!(%url, "Creating CDN folder");

        let response = self
            .http
            .put(&url)
            .header("AccessKey", key)
            .body(Vec::new())
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    gfiles_core::error::ErrorKind::ExternalService,
                    "CDN folder creation request failed",
                    e,
                )
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::external_service(format!(
                "CDN folder creation returned status {}",
                response.status()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_key(key: &str) -> CdnStorageClient {
        CdnStorageClient::new(CdnConfig {
            storage_zone: "gfiles".into(),
            access_key: key.into(),
            endpoint: "https://storage.example.net".into(),
            request_timeout_seconds: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_zone_url_normalization() {
        let client = client_with_key("k");
        assert_eq!(
            client.zone_url("/sales/anna/"),
            "https://storage.example.net/gfiles/sales/anna/"
        );
        assert_eq!(client.zone_url(""), "https://storage.example.net/gfiles/");
    }

    #[test]
    fn test_missing_access_key_is_configuration_error() {
        let client = client_with_key("");
        let err = client.access_key().unwrap_err();
        assert_eq!(err.kind, gfiles_core::error::ErrorKind::Configuration);
    }
}
