//! GeoAPI-Backend: HTTP-Transport und Endpunkte.

pub mod client;
pub mod transport;

pub use client::{features_path, AuthEndpoint, GeoApiClient, AUTH_PATH, PROJECTS_PATH};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport, TransportError};
