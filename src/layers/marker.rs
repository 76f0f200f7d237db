//! Marker-Klassifikation: welcher Marker für welches Feature.

use serde::{Deserialize, Serialize};

use crate::core::Feature;

// ── Circle-Marker ──────────────────────────────────────────────────

/// Radius des Standard-Kreises in Pixeln.
pub const CIRCLE_RADIUS: f32 = 8.0;
/// Füllfarbe des Standard-Kreises (RGBA: Hellgrau, #d3d3d3).
pub const CIRCLE_FILL_COLOR: [f32; 4] = [0.827, 0.827, 0.827, 1.0];
/// Outline-Farbe des Standard-Kreises (RGBA: Schwarz).
pub const CIRCLE_OUTLINE_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
/// Outline-Stärke in Pixeln.
pub const CIRCLE_WEIGHT: f32 = 1.0;
/// Deckkraft der Outline.
pub const CIRCLE_OPACITY: f32 = 1.0;
/// Deckkraft der Füllung.
pub const CIRCLE_FILL_OPACITY: f32 = 0.8;

/// Darstellung eines Features ohne Foto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleStyle {
    pub radius: f32,
    pub fill_color: [f32; 4],
    pub color: [f32; 4],
    pub weight: f32,
    pub opacity: f32,
    pub fill_opacity: f32,
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            radius: CIRCLE_RADIUS,
            fill_color: CIRCLE_FILL_COLOR,
            color: CIRCLE_OUTLINE_COLOR,
            weight: CIRCLE_WEIGHT,
            opacity: CIRCLE_OPACITY,
            fill_opacity: CIRCLE_FILL_OPACITY,
        }
    }
}

/// Marker eines Features, abgeleitet aus der Anzahl der Assets.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerDescriptor {
    /// Genau ein Foto: Vorschaubild als Marker
    Image { path: String },
    /// Mehrere Fotos: Ordner-Symbol
    Collection,
    /// Keine Fotos
    Circle { style: CircleStyle },
}

impl MarkerDescriptor {
    /// Kurzname für Logs und Statusausgaben.
    pub fn label(&self) -> &'static str {
        match self {
            MarkerDescriptor::Image { .. } => "image",
            MarkerDescriptor::Collection => "collection",
            MarkerDescriptor::Circle { .. } => "circle",
        }
    }

    /// Vorschaubild-URL eines Image-Markers.
    pub fn thumbnail_url(&self) -> Option<String> {
        match self {
            MarkerDescriptor::Image { path } => Some(format!("{path}.thumb.jpeg")),
            _ => None,
        }
    }
}

/// Auswahlregel der Klassifikation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationRule {
    /// Ein Asset → Image, mehrere → Collection, sonst Circle
    #[default]
    Layered,
    /// Jedes Feature wird als Collection dargestellt
    CollectionAlways,
}

/// Klassifiziert Features nach fester Regel und Kreis-Stil.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarkerClassifier {
    pub rule: ClassificationRule,
    pub circle_style: CircleStyle,
}

impl MarkerClassifier {
    /// Erstellt einen Classifier.
    pub fn new(rule: ClassificationRule, circle_style: CircleStyle) -> Self {
        Self { rule, circle_style }
    }

    /// Wählt den Marker für ein Feature. Rein und total.
    pub fn classify(&self, feature: &Feature) -> MarkerDescriptor {
        if self.rule == ClassificationRule::CollectionAlways {
            return MarkerDescriptor::Collection;
        }

        match feature.assets() {
            Some([single]) => MarkerDescriptor::Image {
                path: single.path.clone(),
            },
            Some(assets) if assets.len() > 1 => MarkerDescriptor::Collection,
            _ => MarkerDescriptor::Circle {
                style: self.circle_style,
            },
        }
    }
}

/// Klassifiziert mit Standardregel und Standard-Kreis.
pub fn classify(feature: &Feature) -> MarkerDescriptor {
    MarkerClassifier::default().classify(feature)
}
