use glam::DVec2;

use crate::core::MapViewport;
use crate::layers::{BaseLayer, LayerSet};
use crate::shared::ViewerOptions;

/// Zustand der Kartenansicht.
#[derive(Debug, Clone)]
pub struct MapViewState {
    /// Projekt der aktuell angezeigten (oder ladenden) Karte
    pub project_id: Option<u64>,
    /// Wert des `style`-Parameters
    pub style: Option<String>,
    pub base_layer: BaseLayer,
    /// Zähler der Ladevorgänge; ältere Ergebnisse werden verworfen
    pub generation: u64,
    pub loading: bool,
    /// Layer der zuletzt erfolgreich geladenen Collection
    pub layers: Option<LayerSet>,
    pub viewport: MapViewport,
    /// Aktuelle Viewport-Größe in Pixeln
    pub viewport_size: DVec2,
}

impl MapViewState {
    /// Leere Karte mit Standard-Viewport aus den Optionen.
    pub fn new(options: &ViewerOptions) -> Self {
        Self {
            project_id: None,
            style: None,
            base_layer: BaseLayer::default(),
            generation: 0,
            loading: false,
            layers: None,
            viewport: options.default_viewport(),
            viewport_size: options.viewport_size(),
        }
    }

    /// Verwirft geladene Layer und entwertet laufende Ladevorgänge.
    pub fn reset(&mut self, default_viewport: MapViewport) {
        self.generation += 1;
        self.loading = false;
        self.layers = None;
        self.viewport = default_viewport;
    }
}

impl Default for MapViewState {
    fn default() -> Self {
        Self::new(&ViewerOptions::default())
    }
}
