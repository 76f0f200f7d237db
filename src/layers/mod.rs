//! Layer-Aufbau für die Kartenansicht.
//!
//! - `marker`: Marker-Auswahl pro Feature (Image / Collection / Circle)
//! - `cluster`: Proximity-Clustering der Punkt-Marker
//! - `assembler`: Aufteilung in Cluster- und Shape-Layer + Viewport
//! - `base`: Kachel-Hintergrund

pub mod assembler;
pub mod base;
pub mod cluster;
pub mod marker;

pub use assembler::{
    ClusterLayer, ClusterOptions, ItemRef, LayerAssembler, LayerKind, LayerSet, PickResult,
    PointItem, ShapeItem, ShapeLayer,
};
pub use base::BaseLayer;
pub use cluster::{cluster_positions, Cluster, CLUSTER_RADIUS_PX};
pub use marker::{classify, CircleStyle, ClassificationRule, MarkerClassifier, MarkerDescriptor};
