//! GeoAPI Viewer Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod api;
pub mod app;
pub mod core;
pub mod layers;
pub mod session;
pub mod shared;

pub use api::{AuthEndpoint, GeoApiClient, HttpTransport, ReqwestTransport};
pub use app::{AppCommand, AppController, AppIntent, AppState, Route, ViewerServices};
pub use core::{Feature, FeatureCollection, GeoBounds, MapViewport, Project, ViewerError};
pub use layers::{LayerAssembler, LayerSet, MarkerClassifier, MarkerDescriptor};
pub use session::{CredentialInjector, RouteGuard, SessionStore, SessionToken};
pub use shared::ViewerOptions;
