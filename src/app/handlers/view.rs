//! Handler für Zoom und Viewport.

use glam::DVec2;

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::GeoBounds;

/// Aktualisiert die Viewport-Größe im State.
pub fn set_viewport_size(state: &mut AppState, size: DVec2) {
    use_cases::viewport::resize(state, size);
}

/// Setzt die Zoom-Stufe.
pub fn set_zoom(state: &mut AppState, zoom: f64) {
    use_cases::viewport::set_zoom(state, zoom);
}

/// Zoomt auf die Bounds eines Clusters.
pub fn zoom_to_bounds(state: &mut AppState, bounds: GeoBounds) {
    use_cases::viewport::zoom_to_bounds(state, bounds);
}

/// Passt den Viewport auf alle Layer ein.
pub fn fit_to_layers(state: &mut AppState) {
    use_cases::viewport::fit_to_layers(state);
}
