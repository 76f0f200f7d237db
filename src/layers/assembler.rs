//! Layer-Aufbau: FeatureCollection → Cluster-Layer + Shape-Layer + Viewport.

use std::sync::Arc;

use glam::DVec2;

use super::cluster::{cluster_positions, unclustered, Cluster, CLUSTER_RADIUS_PX};
use super::marker::{MarkerClassifier, MarkerDescriptor};
use crate::core::viewport::project;
use crate::core::{
    Feature, FeatureCollection, FitOptions, GeoBounds, GeometryKind, MapViewport, ViewerError,
};

/// Layer, in dem ein Element dargestellt wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Punkt-Features (clusterbar)
    Cluster,
    /// Alle anderen Geometrien
    Shape,
}

/// Referenz auf ein dargestelltes Element: Layer + Index im Layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRef {
    pub layer: LayerKind,
    pub index: usize,
}

/// Punkt-Marker im Cluster-Layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PointItem {
    /// Index des Quell-Features in der Collection
    pub feature_index: usize,
    /// Position (Lon/Lat)
    pub position: DVec2,
    pub marker: MarkerDescriptor,
}

/// Form im Shape-Layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeItem {
    /// Index des Quell-Features in der Collection
    pub feature_index: usize,
    pub kind: GeometryKind,
    pub bounds: GeoBounds,
    /// Marker für punktartige Anteile (z.B. MultiPoint)
    pub marker: MarkerDescriptor,
}

/// Parameter für das Clustering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterOptions {
    /// Pixel-Radius, unterhalb dessen Marker zusammenfallen
    pub radius_px: f64,
    /// Ab dieser Zoom-Stufe wird nicht mehr geclustert
    pub max_zoom: f64,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            radius_px: CLUSTER_RADIUS_PX,
            max_zoom: 19.0,
        }
    }
}

/// Alle Punkt-Features einer Collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterLayer {
    pub items: Vec<PointItem>,
}

impl ClusterLayer {
    /// Gibt die Anzahl der Marker zurück.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Gibt `true` zurück, wenn keine Marker vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Positionen aller Marker in Layer-Reihenfolge.
    pub fn positions(&self) -> Vec<DVec2> {
        self.items.iter().map(|item| item.position).collect()
    }

    /// Cluster bei gegebenem Zoom. Mitglieder sind Indizes in `items`.
    pub fn clusters_at(&self, zoom: f64, options: &ClusterOptions) -> Vec<Cluster> {
        let positions = self.positions();
        if zoom >= options.max_zoom {
            unclustered(&positions)
        } else {
            cluster_positions(&positions, zoom, options.radius_px)
        }
    }
}

/// Alle Nicht-Punkt-Features einer Collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeLayer {
    pub items: Vec<ShapeItem>,
}

impl ShapeLayer {
    /// Gibt die Anzahl der Formen zurück.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Gibt `true` zurück, wenn keine Formen vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Ergebnis eines Klicks auf die Karte.
#[derive(Debug, Clone, PartialEq)]
pub enum PickResult {
    /// Ein einzelnes Element wurde getroffen
    Feature { item: ItemRef, feature_index: usize },
    /// Ein Cluster-Icon mit mehreren Markern wurde getroffen
    Cluster { bounds: GeoBounds, count: usize },
}

/// Ergebnis eines Layer-Aufbaus.
#[derive(Debug, Clone)]
pub struct LayerSet {
    /// Quell-Collection, Elemente verweisen per Index hinein
    pub collection: Arc<FeatureCollection>,
    pub cluster_layer: ClusterLayer,
    pub shape_layer: ShapeLayer,
    /// Bounds aller dargestellten Geometrien (`None` ohne Geometrie)
    pub bounds: Option<GeoBounds>,
    pub viewport: MapViewport,
    /// Features ohne darstellbare Geometrie
    pub skipped: Vec<usize>,
}

impl LayerSet {
    /// Index des Quell-Features eines Elements.
    pub fn feature_index(&self, item: ItemRef) -> Option<usize> {
        match item.layer {
            LayerKind::Cluster => self.cluster_layer.items.get(item.index).map(|i| i.feature_index),
            LayerKind::Shape => self.shape_layer.items.get(item.index).map(|i| i.feature_index),
        }
    }

    /// Quell-Feature eines Elements.
    pub fn feature(&self, item: ItemRef) -> Option<&Feature> {
        self.feature_index(item)
            .and_then(|index| self.collection.get(index))
    }

    /// Marker eines Elements.
    pub fn marker(&self, item: ItemRef) -> Option<&MarkerDescriptor> {
        match item.layer {
            LayerKind::Cluster => self.cluster_layer.items.get(item.index).map(|i| &i.marker),
            LayerKind::Shape => self.shape_layer.items.get(item.index).map(|i| &i.marker),
        }
    }

    /// Anzahl aller dargestellten Elemente.
    pub fn rendered_count(&self) -> usize {
        self.cluster_layer.len() + self.shape_layer.len()
    }

    /// Trifft das Element unter `position` (Lon/Lat) bei gegebenem Zoom.
    ///
    /// Cluster-Icons haben Vorrang vor Formen. Bei Formen gewinnt die zuletzt
    /// gezeichnete, deren Geometrie getroffen wird (Linien und Ränder mit
    /// `pick_radius_px` Toleranz).
    pub fn pick(
        &self,
        position: DVec2,
        zoom: f64,
        pick_radius_px: f64,
        clustering: &ClusterOptions,
    ) -> Option<PickResult> {
        let click = project(position, zoom);
        let hit = self
            .cluster_layer
            .clusters_at(zoom, clustering)
            .into_iter()
            .map(|cluster| {
                let distance = project(cluster.center, zoom).distance(click);
                (cluster, distance)
            })
            .filter(|(_, distance)| *distance <= pick_radius_px)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((cluster, _)) = hit {
            if cluster.is_single() {
                let index = cluster.members[0];
                let feature_index = self.cluster_layer.items.get(index)?.feature_index;
                return Some(PickResult::Feature {
                    item: ItemRef {
                        layer: LayerKind::Cluster,
                        index,
                    },
                    feature_index,
                });
            }
            return Some(PickResult::Cluster {
                bounds: cluster.bounds,
                count: cluster.count(),
            });
        }

        self.shape_layer
            .items
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, shape)| near_bounds(&shape.bounds, click, zoom, pick_radius_px))
            .find(|(_, shape)| {
                self.collection
                    .get(shape.feature_index)
                    .and_then(|feature| feature.geometry.as_ref())
                    .is_some_and(|geometry| geometry.hit_test(click, zoom, pick_radius_px))
            })
            .map(|(index, shape)| PickResult::Feature {
                item: ItemRef {
                    layer: LayerKind::Shape,
                    index,
                },
                feature_index: shape.feature_index,
            })
    }
}

/// Grobe Vorauswahl: Klick liegt in den projizierten, um `margin_px` erweiterten Bounds.
fn near_bounds(bounds: &GeoBounds, click: DVec2, zoom: f64, margin_px: f64) -> bool {
    let north_west = project(DVec2::new(bounds.min.x, bounds.max.y), zoom);
    let south_east = project(DVec2::new(bounds.max.x, bounds.min.y), zoom);
    click.x >= north_west.x - margin_px
        && click.x <= south_east.x + margin_px
        && click.y >= north_west.y - margin_px
        && click.y <= south_east.y + margin_px
}

/// Baut Layer aus einer FeatureCollection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerAssembler {
    pub classifier: MarkerClassifier,
    pub fit: FitOptions,
    /// Viewport ohne darstellbare Geometrie
    pub default_viewport: MapViewport,
}

impl Default for LayerAssembler {
    fn default() -> Self {
        Self {
            classifier: MarkerClassifier::default(),
            fit: FitOptions {
                viewport_size: DVec2::new(1280.0, 720.0),
                padding: 0.0,
                min_zoom: 0.0,
                max_zoom: 19.0,
            },
            default_viewport: MapViewport::default(),
        }
    }
}

impl LayerAssembler {
    /// Erstellt einen Assembler.
    pub fn new(classifier: MarkerClassifier, fit: FitOptions, default_viewport: MapViewport) -> Self {
        Self {
            classifier,
            fit,
            default_viewport,
        }
    }

    /// Teilt die Features nach Geometrie-Typ auf und berechnet den Viewport.
    ///
    /// Schlägt nie fehl: ohne Geometrie wird der Standard-Viewport verwendet.
    pub fn assemble(&self, collection: Arc<FeatureCollection>) -> LayerSet {
        let mut cluster_layer = ClusterLayer::default();
        let mut shape_layer = ShapeLayer::default();
        let mut skipped = Vec::new();

        for (feature_index, feature) in collection.features.iter().enumerate() {
            let Some(geometry) = feature.geometry.as_ref() else {
                skipped.push(feature_index);
                continue;
            };
            let marker = self.classifier.classify(feature);

            if let Some(position) = geometry.point() {
                cluster_layer.items.push(PointItem {
                    feature_index,
                    position,
                    marker,
                });
                continue;
            }

            match geometry.bounds() {
                Ok(bounds) => shape_layer.items.push(ShapeItem {
                    feature_index,
                    kind: geometry.kind(),
                    bounds,
                    marker,
                }),
                Err(e) => {
                    log::warn!("Feature #{feature_index} ({:?}) skipped: {e}", geometry.kind());
                    skipped.push(feature_index);
                }
            }
        }

        let (bounds, viewport) = match self.compute_bounds(&cluster_layer, &shape_layer) {
            Ok(bounds) => (Some(bounds), MapViewport::fit_bounds(&bounds, &self.fit)),
            Err(e) => {
                log::warn!("{e}, using default viewport");
                (None, self.default_viewport)
            }
        };

        log::info!(
            "Assembled layers: {} points, {} shapes, {} skipped",
            cluster_layer.len(),
            shape_layer.len(),
            skipped.len()
        );

        LayerSet {
            collection,
            cluster_layer,
            shape_layer,
            bounds,
            viewport,
            skipped,
        }
    }

    /// Kleinste Box über alle dargestellten Geometrien.
    pub fn compute_bounds(
        &self,
        cluster_layer: &ClusterLayer,
        shape_layer: &ShapeLayer,
    ) -> Result<GeoBounds, ViewerError> {
        let points = cluster_layer
            .items
            .iter()
            .map(|item| GeoBounds::from_point(item.position));
        let shapes = shape_layer.items.iter().map(|item| item.bounds);
        GeoBounds::union_all(points.chain(shapes))
    }
}
