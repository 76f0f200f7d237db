//! Gemeinsame Test-Helfer: In-Memory-Transport und Fixtures.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use geoapi_viewer::api::{ApiRequest, ApiResponse, HttpTransport, TransportError};

/// Transport mit festen Antworten pro Pfad; zeichnet alle Requests auf.
///
/// Klone teilen sich Antworten und Aufzeichnung.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockInner>>,
}

#[derive(Default)]
struct MockInner {
    responses: HashMap<String, Result<ApiResponse, TransportError>>,
    requests: Vec<ApiRequest>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockInner> {
        self.inner.lock().expect("Mock-Lock vergiftet")
    }

    /// Antwortet auf `path` mit Status und Body.
    pub fn respond(&self, path: &str, status: u16, body: &str) -> &Self {
        self.lock()
            .responses
            .insert(path.to_string(), Ok(ApiResponse::new(status, body)));
        self
    }

    /// Lässt Requests auf `path` auf Transportebene scheitern.
    pub fn fail(&self, path: &str) -> &Self {
        self.lock().responses.insert(
            path.to_string(),
            Err(TransportError::Request {
                path: path.to_string(),
                message: "connection refused".into(),
            }),
        );
        self
    }

    /// Alle bisher gesendeten Requests.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    /// Requests auf einen bestimmten Pfad.
    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let response = {
            let mut inner = self.lock();
            let response = inner
                .responses
                .get(&request.path)
                .cloned()
                .unwrap_or_else(|| Ok(ApiResponse::new(404, "")));
            inner.requests.push(request);
            response
        };
        tokio::task::yield_now().await;
        response
    }
}

pub const AUTH_OK: &str = r#"{"jwt":"token-123"}"#;

/// Projekt 42: Punkt ohne Assets, Punkt mit einem Asset, Polygon.
pub const PROJECT_42_FEATURES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature", "id": 1,
      "geometry": {"type": "Point", "coordinates": [-80.0, 40.0]},
      "properties": {"name": "PointA"}
    },
    {
      "type": "Feature", "id": 2,
      "geometry": {"type": "Point", "coordinates": [-79.99, 40.01]},
      "properties": {
        "name": "PointB",
        "assets": [{"id": 5, "path": "x.jpg", "uuid": "a-5", "feature_id": 2, "asset_type": "image"}]
      }
    },
    {
      "type": "Feature", "id": 3,
      "geometry": {"type": "Polygon", "coordinates": [[
        [-80.02, 39.98], [-79.97, 39.98], [-79.97, 40.03], [-80.02, 40.03], [-80.02, 39.98]
      ]]},
      "properties": {"name": "PolygonC", "styles": {"color": "blue"}}
    }
  ]
}"#;

pub const PROJECTS: &str = r#"[
  {"id": 42, "uuid": "p-42", "name": "Coastal Survey", "description": "Post-storm photos"},
  {"id": 7, "uuid": "p-7", "name": "Bridge Inspection", "description": null}
]"#;

/// Transport mit erfolgreicher Auth und den Fixtures von Projekt 42.
pub fn backend() -> MockTransport {
    let transport = MockTransport::new();
    transport
        .respond("/api/auth/", 200, AUTH_OK)
        .respond("/api/projects/", 200, PROJECTS)
        .respond("/api/projects/42/features/", 200, PROJECT_42_FEATURES);
    transport
}
