//! Detailansicht eines angeklickten Features: Galerie + Eigenschaften-Tabelle.

use serde_json::Value;

use crate::core::{Feature, FeatureProperties, GeometryKind};

/// Ein Foto der Galerie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    pub asset_id: u64,
    /// Vollbild (`{path}.jpeg`)
    pub image_url: String,
    /// Vorschaubild (`{path}.thumb.jpeg`)
    pub thumbnail_url: String,
}

/// Eine Zeile der Eigenschaften-Tabelle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    pub key: String,
    pub value: String,
}

/// Inhalt des Detail-Dialogs.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    /// Index des Features in der geladenen Collection
    pub feature_index: usize,
    pub feature_id: Option<u64>,
    pub geometry_kind: Option<GeometryKind>,
    pub gallery: Vec<GalleryImage>,
    /// Attribute in Eingabereihenfolge, ohne reservierte Felder
    pub properties: Vec<PropertyRow>,
}

impl DetailView {
    /// Baut die Detailansicht aus einem Feature.
    pub fn from_feature(feature_index: usize, feature: &Feature) -> Self {
        let gallery = feature
            .assets()
            .unwrap_or_default()
            .iter()
            .map(|asset| GalleryImage {
                asset_id: asset.id,
                image_url: asset.image_url(),
                thumbnail_url: asset.thumbnail_url(),
            })
            .collect();

        let properties = feature
            .properties
            .as_ref()
            .map(|p| {
                p.attributes
                    .iter()
                    .filter(|(key, _)| !FeatureProperties::RESERVED_FIELDS.contains(&key.as_str()))
                    .map(|(key, value)| PropertyRow {
                        key: key.clone(),
                        value: display_value(value),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            feature_index,
            feature_id: feature.id,
            geometry_kind: feature.geometry.as_ref().map(|g| g.kind()),
            gallery,
            properties,
        }
    }

    /// Titel für Dialog und CLI-Ausgabe.
    pub fn title(&self) -> String {
        match self.feature_id {
            Some(id) => format!("Feature {id}"),
            None => format!("Feature #{}", self.feature_index),
        }
    }
}

/// Strings ohne Anführungszeichen, alles andere als JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
