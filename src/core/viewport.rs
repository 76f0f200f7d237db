//! Karten-Viewport (Zentrum + Zoom) mit Web-Mercator-Projektion.

use std::f64::consts::PI;

use glam::DVec2;

use super::GeoBounds;

/// Kachelgröße in Pixeln bei Zoom 0.
pub const TILE_SIZE: f64 = 256.0;
/// Maximale Breite der sphärischen Mercator-Projektion.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

/// Projiziert Lon/Lat auf globale Pixel-Koordinaten bei `zoom` (y wächst nach Süden).
pub fn project(lon_lat: DVec2, zoom: f64) -> DVec2 {
    let scale = TILE_SIZE * 2f64.powf(zoom);
    let lat = lon_lat.y.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let sin_lat = lat.to_radians().sin();
    let x = (lon_lat.x + 180.0) / 360.0;
    let y = 0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI);
    DVec2::new(x, y) * scale
}

/// Umkehrung von [`project`].
pub fn unproject(pixel: DVec2, zoom: f64) -> DVec2 {
    let normalized = pixel / (TILE_SIZE * 2f64.powf(zoom));
    let lon = normalized.x * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * normalized.y)).sinh().atan().to_degrees();
    DVec2::new(lon, lat)
}

/// Parameter für das Einpassen von Bounds in den Viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Viewport-Größe in Pixeln
    pub viewport_size: DVec2,
    /// Rand in Pixeln auf jeder Seite
    pub padding: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

/// Sichtbarer Kartenausschnitt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    /// Zentrum in Lon/Lat
    pub center: DVec2,
    /// Zoom-Stufe (0 = ganze Welt in einer Kachel)
    pub zoom: f64,
}

impl MapViewport {
    /// Standard-Zentrum (Lon, Lat) ohne geladene Geometrie.
    pub const DEFAULT_CENTER: DVec2 = DVec2::new(-80.0, 40.0);
    /// Standard-Zoom ohne geladene Geometrie.
    pub const DEFAULT_ZOOM: f64 = 15.0;

    /// Erstellt einen Viewport.
    pub fn new(center: DVec2, zoom: f64) -> Self {
        Self { center, zoom }
    }

    /// Größte ganzzahlige Zoom-Stufe, bei der `bounds` vollständig sichtbar ist.
    ///
    /// Das Zentrum liegt in der Mitte der projizierten Bounds, nicht in der
    /// Mitte der Grad-Werte.
    pub fn fit_bounds(bounds: &GeoBounds, fit: &FitOptions) -> Self {
        let north_west = project(DVec2::new(bounds.min.x, bounds.max.y), 0.0);
        let south_east = project(DVec2::new(bounds.max.x, bounds.min.y), 0.0);
        let extent = (south_east - north_west).abs();
        let available = (fit.viewport_size - DVec2::splat(2.0 * fit.padding)).max(DVec2::ONE);

        let min_step = fit.min_zoom.ceil() as i32;
        let max_step = fit.max_zoom.floor() as i32;
        let zoom = (min_step..=max_step)
            .rev()
            .map(f64::from)
            .find(|zoom| {
                let scaled = extent * 2f64.powf(*zoom);
                scaled.x <= available.x && scaled.y <= available.y
            })
            .unwrap_or(fit.min_zoom);

        let center = unproject((north_west + south_east) * 0.5, 0.0);

        log::debug!(
            "Fit bounds ({:.5}, {:.5}) to ({:.5}, {:.5}) -> center ({:.5}, {:.5}), zoom {}",
            bounds.min.x,
            bounds.min.y,
            bounds.max.x,
            bounds.max.y,
            center.x,
            center.y,
            zoom
        );

        Self { center, zoom }
    }

    /// Setzt den Zoom, begrenzt auf `[min, max]`.
    ///
    /// Panikfrei auch bei vertauschten oder NaN-Grenzen: NaN-Grenzen werden
    /// ignoriert, bei `min > max` gewinnt `max`.
    pub fn set_zoom_clamped(&mut self, zoom: f64, min: f64, max: f64) {
        if zoom.is_nan() {
            return;
        }
        self.zoom = zoom.max(min).min(max);
    }

    /// Zentriert auf einen Punkt.
    pub fn look_at(&mut self, center: DVec2) {
        self.center = center;
    }

    /// Projiziert einen Punkt bei aktuellem Zoom.
    pub fn project(&self, lon_lat: DVec2) -> DVec2 {
        project(lon_lat, self.zoom)
    }
}

impl Default for MapViewport {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CENTER, Self::DEFAULT_ZOOM)
    }
}
