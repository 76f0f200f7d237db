//! GeoJSON-Datenmodell eines Projekts: Features, Geometrien, Assets.
//!
//! Das Decoding ist pro Feature tolerant: eine kaputte Geometrie oder
//! kaputte Properties verwerfen nur das betroffene Feld, nie die Collection.

use glam::DVec2;
use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::{GeoBounds, ViewerError};

/// Einzelne GeoJSON-Position. `x` = Longitude, `y` = Latitude.
///
/// Zusätzliche Werte (Höhe) werden beim Einlesen ignoriert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub DVec2);

impl Position {
    /// Erstellt eine Position aus Longitude und Latitude.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self(DVec2::new(lon, lat))
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.0.x, self.0.y].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        match values.as_slice() {
            [lon, lat, ..] => Ok(Self::new(*lon, *lat)),
            _ => Err(de::Error::invalid_length(
                values.len(),
                &"at least two coordinates",
            )),
        }
    }
}

/// GeoJSON-Geometrie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

/// Geometrie-Typ ohne Koordinaten (für Layer-Zuordnung und Anzeige).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl Geometry {
    /// Gibt den Geometrie-Typ zurück.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point { .. } => GeometryKind::Point,
            Geometry::MultiPoint { .. } => GeometryKind::MultiPoint,
            Geometry::LineString { .. } => GeometryKind::LineString,
            Geometry::MultiLineString { .. } => GeometryKind::MultiLineString,
            Geometry::Polygon { .. } => GeometryKind::Polygon,
            Geometry::MultiPolygon { .. } => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection { .. } => GeometryKind::GeometryCollection,
        }
    }

    /// Koordinate eines `Point`, sonst `None`.
    pub fn point(&self) -> Option<DVec2> {
        match self {
            Geometry::Point { coordinates } => Some(coordinates.0),
            _ => None,
        }
    }

    /// Alle Stützpunkte der Geometrie (rekursiv für Collections).
    pub fn positions(&self) -> Vec<DVec2> {
        let mut out = Vec::new();
        self.collect_positions(&mut out);
        out
    }

    fn collect_positions(&self, out: &mut Vec<DVec2>) {
        match self {
            Geometry::Point { coordinates } => out.push(coordinates.0),
            Geometry::MultiPoint { coordinates } | Geometry::LineString { coordinates } => {
                out.extend(coordinates.iter().map(|p| p.0));
            }
            Geometry::MultiLineString { coordinates } | Geometry::Polygon { coordinates } => {
                out.extend(coordinates.iter().flatten().map(|p| p.0));
            }
            Geometry::MultiPolygon { coordinates } => {
                out.extend(coordinates.iter().flatten().flatten().map(|p| p.0));
            }
            Geometry::GeometryCollection { geometries } => {
                for geometry in geometries {
                    geometry.collect_positions(out);
                }
            }
        }
    }

    /// Bounding Box der Geometrie, `NoGeometry` bei leeren Koordinatenlisten.
    pub fn bounds(&self) -> Result<GeoBounds, ViewerError> {
        GeoBounds::covering(self.positions())
    }
}

/// Foto-Asset, das an einem Feature hängt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: u64,
    /// Basis-Pfad ohne Dateiendung
    pub path: String,
    #[serde(default)]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
}

impl Asset {
    /// URL des Vollbilds.
    pub fn image_url(&self) -> String {
        format!("{}.jpeg", self.path)
    }

    /// URL des Vorschaubilds.
    pub fn thumbnail_url(&self) -> String {
        format!("{}.thumb.jpeg", self.path)
    }
}

/// Typisierte Properties eines Features.
///
/// `assets` und `styles` sind reservierte Felder, alle übrigen Attribute
/// bleiben in Eingabereihenfolge in `attributes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<Asset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Value>,
    #[serde(flatten)]
    pub attributes: IndexMap<String, Value>,
}

impl FeatureProperties {
    /// Namen der Felder, die nicht als Attribut angezeigt werden.
    pub const RESERVED_FIELDS: [&'static str; 2] = ["assets", "styles"];

    /// Properties mit genau den angegebenen Assets.
    pub fn with_assets(assets: Vec<Asset>) -> Self {
        Self {
            assets: Some(assets),
            ..Self::default()
        }
    }

    /// Liest Properties, ein unlesbares `assets`-Feld wird verworfen.
    fn decode(raw: Value, feature_id: Option<u64>) -> Option<Self> {
        match serde_json::from_value::<FeatureProperties>(raw.clone()) {
            Ok(properties) => Some(properties),
            Err(e) => {
                log::warn!(
                    "Feature {:?}: {}",
                    feature_id,
                    ViewerError::MalformedFeature(format!("properties: {e}"))
                );
                let Value::Object(mut object) = raw else {
                    return None;
                };
                object.remove("assets");
                serde_json::from_value(Value::Object(object)).ok()
            }
        }
    }
}

/// Ein geographisches Objekt mit Attributen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// `None`, wenn die Geometrie fehlt oder unlesbar war
    pub geometry: Option<Geometry>,
    pub properties: Option<FeatureProperties>,
}

impl Feature {
    /// Erstellt ein Feature ohne Properties.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: None,
            geometry: Some(geometry),
            properties: None,
        }
    }

    /// Point-Feature an Longitude/Latitude.
    pub fn point(lon: f64, lat: f64) -> Self {
        Self::new(Geometry::Point {
            coordinates: Position::new(lon, lat),
        })
    }

    /// Setzt die Feature-ID.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Setzt die Properties.
    pub fn with_properties(mut self, properties: FeatureProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Assets des Features, `None` wenn Properties oder `assets` fehlen.
    pub fn assets(&self) -> Option<&[Asset]> {
        self.properties
            .as_ref()
            .and_then(|p| p.assets.as_deref())
    }

    /// Gibt `true` zurück, wenn die Geometrie ein `Point` ist.
    pub fn is_point(&self) -> bool {
        self.geometry
            .as_ref()
            .is_some_and(|g| g.kind() == GeometryKind::Point)
    }

    /// Tolerantes Decoding eines einzelnen Features.
    ///
    /// Gibt zusätzlich zurück, ob das Feature fehlerhaft war.
    pub fn from_value(value: Value) -> (Self, bool) {
        let Value::Object(mut object) = value else {
            log::warn!(
                "{}",
                ViewerError::MalformedFeature("feature is not a JSON object".into())
            );
            return (Self::default(), true);
        };

        let id = object.get("id").and_then(Value::as_u64);
        let mut malformed = false;

        let geometry = match object.remove("geometry") {
            None | Some(Value::Null) => {
                log::warn!(
                    "Feature {:?}: {}",
                    id,
                    ViewerError::MalformedFeature("geometry missing".into())
                );
                malformed = true;
                None
            }
            Some(raw) => match serde_json::from_value::<Geometry>(raw) {
                Ok(geometry) => Some(geometry),
                Err(e) => {
                    log::warn!(
                        "Feature {:?}: {}",
                        id,
                        ViewerError::MalformedFeature(format!("geometry: {e}"))
                    );
                    malformed = true;
                    None
                }
            },
        };

        let properties = match object.remove("properties") {
            None | Some(Value::Null) => None,
            Some(raw) => {
                let assets_given = raw.get("assets").is_some_and(|a| !a.is_null());
                let decoded = FeatureProperties::decode(raw, id);
                let assets_lost =
                    assets_given && decoded.as_ref().and_then(|p| p.assets.as_ref()).is_none();
                if decoded.is_none() || assets_lost {
                    malformed = true;
                }
                decoded
            }
        };

        (
            Self {
                id,
                geometry,
                properties,
            },
            malformed,
        )
    }
}

#[derive(Deserialize)]
struct RawFeatureCollection {
    #[serde(default)]
    features: Vec<Value>,
}

/// Alle Features eines Projekts, wird pro Ladevorgang komplett ersetzt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection", from = "RawFeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    /// Indizes der Features, die nur teilweise gelesen werden konnten
    #[serde(skip)]
    pub malformed: Vec<usize>,
}

impl From<RawFeatureCollection> for FeatureCollection {
    fn from(raw: RawFeatureCollection) -> Self {
        let mut features = Vec::with_capacity(raw.features.len());
        let mut malformed = Vec::new();
        for (index, value) in raw.features.into_iter().enumerate() {
            let (feature, is_malformed) = Feature::from_value(value);
            if is_malformed {
                malformed.push(index);
            }
            features.push(feature);
        }
        Self {
            features,
            malformed,
        }
    }
}

impl FeatureCollection {
    /// Erstellt eine Collection aus bereits gelesenen Features.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            malformed: Vec::new(),
        }
    }

    /// Liest eine Collection aus JSON-Bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Gibt die Anzahl der Features zurück.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Gibt `true` zurück, wenn keine Features vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feature per Index.
    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_points_shapes_and_assets() {
        let payload = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": 1,
                 "geometry": {"type": "Point", "coordinates": [-80.0, 40.0, 12.5]},
                 "properties": {"assets": [{"id": 7, "path": "/assets/x", "uuid": "u-7"}], "name": "A"}},
                {"type": "Feature", "id": 2,
                 "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]},
                 "properties": null}
            ]
        });

        let collection: FeatureCollection =
            serde_json::from_value(payload).expect("Collection erwartet");

        assert_eq!(collection.len(), 2);
        assert!(collection.malformed.is_empty());
        let first = collection.get(0).expect("Feature erwartet");
        assert_eq!(first.geometry.as_ref().and_then(Geometry::point), Some(DVec2::new(-80.0, 40.0)));
        assert_eq!(first.assets().map(<[Asset]>::len), Some(1));
        assert_eq!(
            collection.get(1).and_then(|f| f.geometry.as_ref()).map(Geometry::kind),
            Some(GeometryKind::Polygon)
        );
    }

    #[test]
    fn malformed_geometry_keeps_feature() {
        let payload = json!({
            "features": [
                {"geometry": {"type": "Blob", "coordinates": []}, "properties": {"name": "X"}},
                {"geometry": {"type": "Point", "coordinates": [1.0]}}
            ]
        });

        let collection: FeatureCollection =
            serde_json::from_value(payload).expect("Collection erwartet");

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.malformed, vec![0, 1]);
        assert!(collection.features.iter().all(|f| f.geometry.is_none()));
        let name = collection.features[0]
            .properties
            .as_ref()
            .and_then(|p| p.attributes.get("name"));
        assert_eq!(name, Some(&json!("X")));
    }

    #[test]
    fn unreadable_assets_are_dropped_but_attributes_survive() {
        let (feature, malformed) = Feature::from_value(json!({
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
            "properties": {"assets": "not-a-list", "height": 3}
        }));

        assert!(malformed);
        assert!(feature.assets().is_none());
        let height = feature
            .properties
            .as_ref()
            .and_then(|p| p.attributes.get("height"));
        assert_eq!(height, Some(&json!(3)));
    }

    #[test]
    fn attributes_keep_input_order() {
        let properties: FeatureProperties =
            serde_json::from_value(json!({"zeta": 1, "alpha": 2, "styles": {}, "mid": 3}))
                .expect("Properties erwartet");

        let keys: Vec<&str> = properties.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert!(properties.styles.is_some());
    }

    #[test]
    fn asset_urls_follow_gallery_convention() {
        let asset = Asset {
            id: 1,
            path: "/assets/42/photo".into(),
            uuid: "abc".into(),
            feature_id: None,
            asset_type: Some("image".into()),
        };

        assert_eq!(asset.image_url(), "/assets/42/photo.jpeg");
        assert_eq!(asset.thumbnail_url(), "/assets/42/photo.thumb.jpeg");
    }
}
