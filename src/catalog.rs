//! Read-only client for the external creature catalog (PokeAPI by default).

use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::error::AppError;

pub const NOT_FOUND_MESSAGE: &str = "Your creature was not found!";

/// Fetches creature data by name from `{base_url}/pokemon/{name}`.
///
/// Built once at startup and shared as `web::Data<CatalogClient>`; the inner
/// `reqwest::Client` pools connections across requests.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL for one creature; `name` becomes a single percent-encoded path segment.
    ///
    /// Blank names and the dot segments `.`/`..` would address the catalog's index
    /// rather than a creature, so they are reported as `AppError::NotFound`.
    pub fn creature_url(&self, name: &str) -> Result<Url, AppError> {
        if name.trim().is_empty() || name == "." || name == ".." {
            return Err(AppError::NotFound(NOT_FOUND_MESSAGE.into()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::InternalServerError(format!(
                    "Catalog base URL cannot have path segments: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push("pokemon")
            .push(name);
        Ok(url)
    }

    /// Returns the upstream JSON for `name` untouched.
    ///
    /// Upstream 404 becomes `AppError::NotFound`; any other failure (transport,
    /// non-success status, invalid JSON) becomes `AppError::UpstreamError`.
    pub async fn fetch(&self, name: &str) -> Result<Value, AppError> {
        let url = self.creature_url(name)?;
        log::debug!("Fetching creature from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("Catalog request failed: {}", e)))?;

        match response.status() {
            status if status.is_success() => response.json::<Value>().await.map_err(|e| {
                AppError::UpstreamError(format!("Catalog returned invalid JSON: {}", e))
            }),
            StatusCode::NOT_FOUND => Err(AppError::NotFound(NOT_FOUND_MESSAGE.into())),
            status => Err(AppError::UpstreamError(format!(
                "Catalog responded with status {}",
                status
            ))),
        }
    }
}
