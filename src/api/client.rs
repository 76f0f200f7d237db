//! GeoAPI-Endpunkte: Auth, Projektliste, Features eines Projekts.

use serde::Deserialize;

use super::transport::{ApiRequest, ApiResponse, HttpTransport};
use crate::core::{FeatureCollection, Project, ViewerError};
use crate::session::store::{Authenticator, SessionToken};

/// Auth-Endpunkt, liefert `{ "jwt": "..." }`.
pub const AUTH_PATH: &str = "/api/auth/";
/// Projektliste.
pub const PROJECTS_PATH: &str = "/api/projects/";

/// Feature-Endpunkt eines Projekts.
pub fn features_path(project_id: u64) -> String {
    format!("/api/projects/{project_id}/features/")
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    jwt: Option<String>,
}

/// Beschafft Tokens über `GET /api/auth/` (ohne Token-Header).
pub struct AuthEndpoint<T> {
    transport: T,
}

impl<T> AuthEndpoint<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: HttpTransport> Authenticator for AuthEndpoint<T> {
    async fn authenticate(&self) -> Result<SessionToken, ViewerError> {
        let response = self
            .transport
            .send(ApiRequest::get(AUTH_PATH))
            .await
            .map_err(|e| ViewerError::AuthFailed(e.to_string()))?;

        if !response.is_success() {
            return Err(ViewerError::AuthFailed(format!(
                "{AUTH_PATH} responded with status {}",
                response.status
            )));
        }

        let body: AuthResponse = serde_json::from_slice(&response.body)
            .map_err(|e| ViewerError::AuthFailed(format!("unreadable auth response: {e}")))?;

        match body.jwt {
            Some(jwt) if !jwt.is_empty() => Ok(SessionToken::new(jwt)),
            _ => Err(ViewerError::AuthFailed("response carries no jwt".into())),
        }
    }
}

/// Datenabruf über einen (in der Regel token-injizierenden) Transport.
pub struct GeoApiClient<C> {
    transport: C,
}

impl<C: HttpTransport> GeoApiClient<C> {
    pub fn new(transport: C) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    /// Lädt die Projektliste.
    pub async fn fetch_projects(&self) -> Result<Vec<Project>, ViewerError> {
        let response = self.get(PROJECTS_PATH).await?;
        serde_json::from_slice(&response.body)
            .map_err(|e| ViewerError::FetchFailed(format!("unreadable project list: {e}")))
    }

    /// Lädt alle Features eines Projekts.
    ///
    /// Einzelne unlesbare Features machen den Abruf nicht ungültig, sie
    /// werden in `FeatureCollection::malformed` gemeldet.
    pub async fn fetch_features(&self, project_id: u64) -> Result<FeatureCollection, ViewerError> {
        let response = self.get(&features_path(project_id)).await?;
        let collection = FeatureCollection::from_json_slice(&response.body).map_err(|e| {
            ViewerError::FetchFailed(format!("unreadable features of project {project_id}: {e}"))
        })?;

        log::info!(
            "Fetched {} features for project {project_id} ({} malformed)",
            collection.len(),
            collection.malformed.len()
        );
        Ok(collection)
    }

    async fn get(&self, path: &str) -> Result<ApiResponse, ViewerError> {
        let response = self
            .transport
            .send(ApiRequest::get(path))
            .await
            .map_err(|e| ViewerError::FetchFailed(e.to_string()))?;

        if !response.is_success() {
            return Err(ViewerError::FetchFailed(format!(
                "{path} responded with status {}",
                response.status
            )));
        }
        Ok(response)
    }
}
