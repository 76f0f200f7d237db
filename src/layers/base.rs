//! Kachel-Hintergrund der Karte (OSM oder Satellit).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::viewport::{project, TILE_SIZE};

/// Höchste Zoom-Stufe beider Kachel-Server.
pub const MAX_TILE_ZOOM: u8 = 19;

/// Basiskarte, gewählt über den `style`-Parameter der Kartenroute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseLayer {
    #[default]
    Streets,
    Satellite,
}

impl BaseLayer {
    /// `satellite` wählt Luftbilder, alles andere die Straßenkarte.
    pub fn from_style(style: Option<&str>) -> Self {
        match style.map(str::to_ascii_lowercase).as_deref() {
            Some("satellite") => BaseLayer::Satellite,
            _ => BaseLayer::Streets,
        }
    }

    pub fn url_template(&self) -> &'static str {
        match self {
            BaseLayer::Streets => "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            BaseLayer::Satellite => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
            }
        }
    }

    pub fn max_zoom(&self) -> u8 {
        MAX_TILE_ZOOM
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            BaseLayer::Streets => "© OpenStreetMap contributors",
            BaseLayer::Satellite => "Esri World Imagery",
        }
    }

    /// Kachel-Koordinaten (x, y) unter `lon_lat` bei ganzzahligem Zoom.
    ///
    /// Zoom-Stufen über [`MAX_TILE_ZOOM`] werden darauf begrenzt.
    pub fn tile_at(lon_lat: DVec2, zoom: u8) -> (u32, u32) {
        let zoom = zoom.min(MAX_TILE_ZOOM);
        let n = 1_i64 << zoom;
        let pixel = project(lon_lat, zoom as f64) / TILE_SIZE;
        let x = (pixel.x.floor() as i64).rem_euclid(n);
        let y = (pixel.y.floor() as i64).clamp(0, n - 1);
        (x as u32, y as u32)
    }

    /// URL der Kachel unter `lon_lat`; der Zoom wird auf `max_zoom` begrenzt.
    pub fn tile_url(&self, lon_lat: DVec2, zoom: f64) -> String {
        let zoom = zoom.round().clamp(0.0, self.max_zoom() as f64) as u8;
        let (x, y) = Self::tile_at(lon_lat, zoom);
        self.url_template()
            .replace("{s}", "a")
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_selects_base_layer() {
        assert_eq!(BaseLayer::from_style(Some("satellite")), BaseLayer::Satellite);
        assert_eq!(BaseLayer::from_style(Some("Satellite")), BaseLayer::Satellite);
        assert_eq!(BaseLayer::from_style(Some("dark")), BaseLayer::Streets);
        assert_eq!(BaseLayer::from_style(None), BaseLayer::Streets);
    }

    #[test]
    fn tile_at_caps_oversized_zoom() {
        let position = DVec2::new(-80.0, 40.0);

        assert_eq!(
            BaseLayer::tile_at(position, u8::MAX),
            BaseLayer::tile_at(position, MAX_TILE_ZOOM)
        );
        assert_eq!(
            BaseLayer::tile_at(position, 64),
            BaseLayer::tile_at(position, MAX_TILE_ZOOM)
        );
    }

    #[test]
    fn tile_at_zoom_zero_is_single_tile() {
        assert_eq!(BaseLayer::tile_at(DVec2::new(-80.0, 40.0), 0), (0, 0));
    }

    #[test]
    fn tile_at_zoom_one_splits_quadrants() {
        assert_eq!(BaseLayer::tile_at(DVec2::new(-80.0, 40.0), 1), (0, 0));
        assert_eq!(BaseLayer::tile_at(DVec2::new(80.0, -40.0), 1), (1, 1));
    }

    #[test]
    fn tile_url_fills_template() {
        let streets = BaseLayer::Streets.tile_url(DVec2::new(80.0, -40.0), 1.0);
        let satellite = BaseLayer::Satellite.tile_url(DVec2::new(80.0, -40.0), 1.0);

        assert_eq!(streets, "https://a.tile.openstreetmap.org/1/1/1.png");
        assert!(satellite.ends_with("/tile/1/1/1"));
    }
}
