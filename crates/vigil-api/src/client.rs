// Vigil API HTTP client
//
// Wraps `reqwest::Client` with bearer-credential injection, query-parameter
// serialization, and error normalization. All endpoint groups (policies,
// violations, etc.) are implemented as inherent methods via separate files
// to keep this module focused on transport mechanics.

use std::sync::RwLock;

use bytes::Bytes;
use reqwest::multipart;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Error body shape returned by the Vigil API.
///
/// The server emits `{"detail": "..."}`; older deployments used
/// `{"message": "..."}`. Accept both.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Raw HTTP client for the Vigil API.
///
/// Performs no retries and caches nothing -- retry policy and caching
/// belong to the query layer in `vigil-core`. The bearer token is
/// swappable at runtime because a session can log in or out without the
/// process restarting.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    /// Bearer credential for the current session. `None` before login
    /// (only `/auth/login` is reachable without it).
    token: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Create a new client from a base URL and transport config.
    ///
    /// `base_url` should be the API root (e.g. `https://api.vigil.example/v1/`);
    /// a trailing slash is added if missing so relative joins behave.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Self {
            http,
            base_url,
            token: RwLock::new(None),
        }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Credential management ────────────────────────────────────────

    /// Install the bearer token used for subsequent requests.
    pub fn set_token(&self, token: SecretString) {
        debug!("installing bearer token");
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    /// Drop the bearer token (logout).
    pub fn clear_token(&self) {
        debug!("clearing bearer token");
        *self.token.write().expect("token lock poisoned") = None;
    }

    /// Apply the stored bearer token to a request builder.
    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.token.read().expect("token lock poisoned");
        match guard.as_ref() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"violations/vio-001"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        self.base_url
            .join(path.trim_start_matches('/'))
            .expect("path should be a valid relative URL")
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.apply_auth(self.http.get(url)).send().await?;
        self.handle_response(path, resp).await
    }

    /// GET with query parameters. Empty values are omitted rather than
    /// serialized as empty strings -- the server treats `?status=` as a
    /// malformed filter.
    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        let params: Vec<(&str, &str)> = params
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        debug!("GET {url} params={params:?}");

        let resp = self
            .apply_auth(self.http.get(url).query(&params))
            .send()
            .await?;
        self.handle_response(path, resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.apply_auth(self.http.post(url).json(body)).send().await?;
        self.handle_response(path, resp).await
    }

    /// POST with no request body (e.g. `scans/run`, `extract-rules`).
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.apply_auth(self.http.post(url)).send().await?;
        self.handle_response(path, resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PUT {url}");

        let resp = self.apply_auth(self.http.put(url).json(body)).send().await?;
        self.handle_response(path, resp).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PATCH {url}");

        let resp = self
            .apply_auth(self.http.patch(url).json(body))
            .send()
            .await?;
        self.handle_response(path, resp).await
    }

    #[allow(dead_code)]
    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("DELETE {url}");

        let resp = self.apply_auth(self.http.delete(url)).send().await?;
        self.handle_response(path, resp).await
    }

    // ── Binary transport ─────────────────────────────────────────────

    /// Upload a file as `multipart/form-data` under the `file` field
    /// (policy PDFs, CSV imports).
    pub(crate) async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url} (multipart, {} bytes)", content.len());

        let part = multipart::Part::bytes(content).file_name(file_name.to_owned());
        let form = multipart::Form::new().part("file", part);

        let resp = self
            .apply_auth(self.http.post(url).multipart(form))
            .send()
            .await?;
        self.handle_response(path, resp).await
    }

    /// Download a binary payload (scan exports).
    pub(crate) async fn download(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Bytes, Error> {
        let url = self.url(path);
        let params: Vec<(&str, &str)> = params
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        debug!("GET {url} (blob) params={params:?}");

        let resp = self
            .apply_auth(self.http.get(url).query(&params))
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            Ok(resp.bytes().await?)
        } else {
            Err(self.parse_error(path, status, resp).await)
        }
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(path, status, resp).await)
        }
    }

    async fn parse_error(
        &self,
        path: &str,
        status: reqwest::StatusCode,
        resp: reqwest::Response,
    ) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.detail.or(e.message))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw[..raw.len().min(200)].to_owned()
                }
            });

        match status {
            reqwest::StatusCode::UNAUTHORIZED => Error::Authentication { message },
            reqwest::StatusCode::NOT_FOUND => Error::NotFound {
                resource: path.to_owned(),
            },
            _ => Error::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}
