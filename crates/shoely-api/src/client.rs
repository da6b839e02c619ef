// Async HTTP client for the shoe REST resource.
//
// Every endpoint lives under `{base_url}/{resource}` (`shoes` by default):
// list, create, replace and delete.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{Shoe, ShoeId, ShoeWrite};
use crate::transport::TransportConfig;

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the shoe inventory service.
///
/// Any 2xx status counts as success. Everything else becomes
/// [`Error::Api`] carrying the status and the response body (or the
/// canonical reason phrase when the body is empty).
pub struct ShoeClient {
    http: reqwest::Client,
    base_url: Url,
    resource: String,
}

impl ShoeClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL, resource name and transport config.
    pub fn new(base_url: &str, resource: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, resource, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, resource: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            resource: resource.trim_matches('/').to_owned(),
        })
    }

    /// Ensure the base path ends with `/` so relative joins append
    /// instead of replacing the last segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resource segment appended to the base URL.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn collection_url(&self) -> Result<Url, Error> {
        Ok(self.base_url.join(&self.resource)?)
    }

    fn item_url(&self, id: &ShoeId) -> Result<Url, Error> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(id.as_str());
        Ok(url)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// List every shoe, in service order.
    ///
    /// `GET /{resource}`
    pub async fn list_shoes(&self) -> Result<Vec<Shoe>, Error> {
        let url = self.collection_url()?;
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    /// Create a shoe and return the stored record.
    ///
    /// `POST /{resource}`
    pub async fn create_shoe(&self, body: &ShoeWrite) -> Result<Shoe, Error> {
        let url = self.collection_url()?;
        debug!("POST {url}");
        self.send_json(self.http.post(url), body).await
    }

    /// Replace a shoe's fields and return the stored record.
    ///
    /// `PUT /{resource}/{id}`
    pub async fn update_shoe(&self, id: &ShoeId, body: &ShoeWrite) -> Result<Shoe, Error> {
        let url = self.item_url(id)?;
        debug!("PUT {url}");
        self.send_json(self.http.put(url), body).await
    }

    /// Delete a shoe. The response body, if any, is ignored.
    ///
    /// `DELETE /{resource}/{id}`
    pub async fn delete_shoe(&self, id: &ShoeId) -> Result<(), Error> {
        let url = self.item_url(id)?;
        debug!("DELETE {url}");
        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn send_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        request: reqwest::RequestBuilder,
        body: &B,
    ) -> Result<T, Error> {
        let resp = request.json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let message = if raw.trim().is_empty() {
            status.to_string()
        } else {
            raw
        };
        debug!(status = status.as_u16(), "service returned an error status");
        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
