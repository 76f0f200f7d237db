//! HTTP-Transport hinter einem Trait, damit Auth, Injector und Client
//! ohne Netzwerk testbar bleiben.

use std::future::Future;
use std::time::Duration;

use indexmap::IndexMap;
use thiserror::Error;

/// Ausgehender GET-Request relativ zur API-Basis-URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Pfad inklusive führendem `/`, z.B. `/api/projects/`
    pub path: String,
    /// Header in Einfügereihenfolge
    pub headers: IndexMap<String, String>,
}

impl ApiRequest {
    /// Erstellt einen GET-Request ohne Header.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            headers: IndexMap::new(),
        }
    }

    /// Setzt einen Header, ein vorhandener Wert wird ersetzt.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Liest einen Header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Antwort des Backends (Status + roher Body).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Erstellt eine Antwort.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx-Status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fehler unterhalb der HTTP-Ebene (kein Status erhalten).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request to {path} failed: {message}")]
    Request { path: String, message: String },
    #[error("request to {path} timed out")]
    Timeout { path: String },
}

/// Sendet API-Requests. Implementierungen: `ReqwestTransport`,
/// `CredentialInjector` (Dekorator) und Mocks in Tests.
pub trait HttpTransport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>>;
}

/// Transport über `reqwest` (async, rustls).
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Erstellt einen Transport; `timeout = None` wartet unbegrenzt.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Basis-URL ohne abschließenden `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_error(path: &str, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                path: path.to_string(),
            }
        } else {
            TransportError::Request {
                path: path.to_string(),
                message: error.to_string(),
            }
        }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        log::debug!("GET {url}");

        let mut builder = self.client.get(&url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&request.path, e))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&request.path, e))?
            .to_vec();

        Ok(ApiResponse { status, body })
    }
}
