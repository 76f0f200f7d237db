//! Use-Case-Funktionen für Viewport-Zustand.

use glam::DVec2;

use crate::app::AppState;
use crate::core::{GeoBounds, MapViewport};

/// Aktualisiert die gespeicherte Viewport-Größe.
pub fn resize(state: &mut AppState, size: DVec2) {
    state.view.viewport_size = size;
}

/// Setzt die Zoom-Stufe, geklemmt auf die konfigurierten Grenzen.
pub fn set_zoom(state: &mut AppState, zoom: f64) {
    let (min, max) = (state.options.min_zoom, state.options.max_zoom);
    state.view.viewport.set_zoom_clamped(zoom, min, max);
}

/// Zoomt auf Bounds, mindestens eine Stufe tiefer als bisher.
pub fn zoom_to_bounds(state: &mut AppState, bounds: GeoBounds) {
    let fit = state.options.fit_options(state.view.viewport_size);
    let fitted = MapViewport::fit_bounds(&bounds, &fit);
    let current = state.view.viewport.zoom;
    let zoom = if fitted.zoom > current {
        fitted.zoom
    } else {
        (current + 1.0).min(state.options.max_zoom)
    };

    state.view.viewport = MapViewport::new(fitted.center, zoom);
}

/// Passt den Viewport auf die geladenen Layer ein, ohne Layer: Standard-Viewport.
pub fn fit_to_layers(state: &mut AppState) {
    let bounds = state.view.layers.as_ref().and_then(|layers| layers.bounds);
    state.view.viewport = match bounds {
        Some(bounds) => {
            MapViewport::fit_bounds(&bounds, &state.options.fit_options(state.view.viewport_size))
        }
        None => state.options.default_viewport(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn resize_updates_viewport_size() {
        let mut state = AppState::new();

        resize(&mut state, DVec2::new(1920.0, 1080.0));

        assert_eq!(state.view.viewport_size, DVec2::new(1920.0, 1080.0));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut state = AppState::new();

        set_zoom(&mut state, 42.0);
        assert_relative_eq!(state.view.viewport.zoom, state.options.max_zoom);

        set_zoom(&mut state, -3.0);
        assert_relative_eq!(state.view.viewport.zoom, state.options.min_zoom);
    }

    #[test]
    fn zoom_with_inverted_limits_from_config_does_not_panic() {
        let options: crate::shared::ViewerOptions =
            toml::from_str("min_zoom = 10.0\nmax_zoom = 5.0").expect("TOML lesbar");
        let mut state = AppState::with_options(options);

        set_zoom(&mut state, 7.0);
        assert_relative_eq!(state.view.viewport.zoom, 7.0);

        state.options.min_zoom = f64::NAN;
        set_zoom(&mut state, 30.0);
        assert_relative_eq!(state.view.viewport.zoom, state.options.max_zoom);
    }

    #[test]
    fn zoom_to_identical_points_steps_in() {
        let mut state = AppState::new();
        state.view.viewport = MapViewport::new(DVec2::ZERO, 19.0);
        let bounds = GeoBounds::from_point(DVec2::new(5.0, 5.0));

        zoom_to_bounds(&mut state, bounds);

        assert_relative_eq!(state.view.viewport.zoom, 19.0);
        assert_relative_eq!(state.view.viewport.center.x, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn fit_without_layers_uses_default() {
        let mut state = AppState::new();
        state.view.viewport = MapViewport::new(DVec2::ZERO, 3.0);

        fit_to_layers(&mut state);

        assert_eq!(state.view.viewport, MapViewport::default());
    }
}
