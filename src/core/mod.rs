//! Core-Domänentypen: Features, Projekte, Bounds, Viewport, Spatial-Index.

pub mod bounds;
pub mod error;
/// GeoJSON-Datenmodell
///
/// - FeatureCollection: alle Features eines Projekts
/// - Feature: Geometrie + typisierte Properties
/// - Asset: Foto, das an einem Feature hängt
pub mod feature;
mod hit;
pub mod project;
pub mod spatial;
pub mod viewport;

pub use bounds::GeoBounds;
pub use error::ViewerError;
pub use feature::{
    Asset, Feature, FeatureCollection, FeatureProperties, Geometry, GeometryKind, Position,
};
pub use project::Project;
pub use spatial::{SpatialIndex, SpatialMatch};
pub use viewport::{FitOptions, MapViewport};
