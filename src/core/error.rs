//! Fehlerarten des Viewers.

use thiserror::Error;

/// Domänenfehler entlang der Kette Auth → Abruf → Layer-Aufbau.
///
/// `Clone`, weil ein Auth-Ergebnis an alle wartenden Aufrufer verteilt wird.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerError {
    /// Auth-Endpoint nicht erreichbar oder Antwort ohne Token
    #[error("authentication failed: {0}")]
    AuthFailed(String),
    /// Projekt- oder Feature-Abruf fehlgeschlagen
    #[error("fetch failed: {0}")]
    FetchFailed(String),
    /// Viewport-Berechnung ohne eine einzige Geometrie
    #[error("no geometry to compute bounds from")]
    NoGeometry,
    /// Geometrie oder Properties eines Features unlesbar
    #[error("malformed feature: {0}")]
    MalformedFeature(String),
}
