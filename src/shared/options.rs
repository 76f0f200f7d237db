//! Zentrale Konfiguration für den GeoAPI-Viewer.
//!
//! `ViewerOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use std::time::Duration;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::{FitOptions, MapViewport};
use crate::layers::{CircleStyle, ClassificationRule, ClusterOptions, MarkerClassifier};

// ── Backend ─────────────────────────────────────────────────────────

/// Standard-Basis-URL des GeoAPI-Backends.
pub const API_BASE_URL: &str = "http://localhost:8000";
/// Standard-Timeout für API-Requests in Sekunden (0 = kein Timeout).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// ── Karte ───────────────────────────────────────────────────────────

/// Minimale Zoom-Stufe.
pub const MAP_ZOOM_MIN: f64 = 0.0;
/// Maximale Zoom-Stufe (Grenze der Kachel-Server).
pub const MAP_ZOOM_MAX: f64 = 19.0;
/// Angenommene Viewport-Größe in Pixeln, bis der Host eine echte meldet.
pub const VIEWPORT_SIZE_PX: [f64; 2] = [1280.0, 720.0];
/// Rand beim Einpassen der Bounds in Pixeln.
pub const FIT_PADDING_PX: f64 = 0.0;

// ── Marker ──────────────────────────────────────────────────────────

/// Cluster-Radius in Pixeln.
pub const CLUSTER_RADIUS_PX: f64 = crate::layers::CLUSTER_RADIUS_PX;
/// Pick-Radius für Klicks auf Marker in Pixeln.
pub const PICK_RADIUS_PX: f64 = 12.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Viewer-Optionen.
/// Wird als `geoapi_viewer.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    // ── Backend ─────────────────────────────────────────────────
    /// Basis-URL des Backends (ohne `/api`)
    pub api_base_url: String,
    /// Request-Timeout in Sekunden, 0 deaktiviert
    pub request_timeout_secs: u64,

    // ── Karte ───────────────────────────────────────────────────
    /// Zentrum ohne Geometrie `[lon, lat]`
    pub default_center: [f64; 2],
    /// Zoom ohne Geometrie
    pub default_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Viewport-Größe `[breite, höhe]` in Pixeln
    pub viewport_size_px: [f64; 2],
    pub fit_padding_px: f64,

    // ── Marker ──────────────────────────────────────────────────
    pub cluster_radius_px: f64,
    pub pick_radius_px: f64,
    /// Stil der Circle-Marker
    pub circle_style: CircleStyle,
    /// Regel der Marker-Auswahl
    pub classification_rule: ClassificationRule,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            request_timeout_secs: REQUEST_TIMEOUT_SECS,

            default_center: MapViewport::DEFAULT_CENTER.to_array(),
            default_zoom: MapViewport::DEFAULT_ZOOM,
            min_zoom: MAP_ZOOM_MIN,
            max_zoom: MAP_ZOOM_MAX,
            viewport_size_px: VIEWPORT_SIZE_PX,
            fit_padding_px: FIT_PADDING_PX,

            cluster_radius_px: CLUSTER_RADIUS_PX,
            pick_radius_px: PICK_RADIUS_PX,
            circle_style: CircleStyle::default(),
            classification_rule: ClassificationRule::default(),
        }
    }
}

impl ViewerOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts.validated()
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("geoapi_viewer"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("geoapi_viewer.toml")
    }

    /// Ersetzt unbrauchbare Karten-Grenzen durch Standardwerte.
    ///
    /// Zoom-Grenzen müssen endlich sein und `min_zoom <= max_zoom` erfüllen,
    /// Standard-Zoom und -Zentrum endlich, die Viewport-Größe positiv.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if !self.min_zoom.is_finite() || !self.max_zoom.is_finite() || self.min_zoom > self.max_zoom
        {
            log::warn!(
                "Ungültige Zoom-Grenzen [{}, {}], verwende [{}, {}]",
                self.min_zoom,
                self.max_zoom,
                defaults.min_zoom,
                defaults.max_zoom
            );
            self.min_zoom = defaults.min_zoom;
            self.max_zoom = defaults.max_zoom;
        }
        if !self.default_zoom.is_finite() || !self.default_center.iter().all(|v| v.is_finite()) {
            log::warn!("Ungültiger Standard-Viewport, verwende Standardwerte");
            self.default_zoom = defaults.default_zoom;
            self.default_center = defaults.default_center;
        }
        self.default_zoom = self.default_zoom.max(self.min_zoom).min(self.max_zoom);
        if !self.viewport_size_px.iter().all(|v| v.is_finite() && *v > 0.0) {
            log::warn!("Ungültige Viewport-Größe {:?}", self.viewport_size_px);
            self.viewport_size_px = defaults.viewport_size_px;
        }

        self
    }

    /// Request-Timeout, `None` bei 0.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Viewport ohne darstellbare Geometrie.
    pub fn default_viewport(&self) -> MapViewport {
        MapViewport::new(DVec2::from_array(self.default_center), self.default_zoom)
    }

    pub fn viewport_size(&self) -> DVec2 {
        DVec2::from_array(self.viewport_size_px)
    }

    /// Fit-Parameter für eine konkrete Viewport-Größe.
    pub fn fit_options(&self, viewport_size: DVec2) -> FitOptions {
        FitOptions {
            viewport_size,
            padding: self.fit_padding_px,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
        }
    }

    pub fn cluster_options(&self) -> ClusterOptions {
        ClusterOptions {
            radius_px: self.cluster_radius_px,
            max_zoom: self.max_zoom,
        }
    }

    pub fn classifier(&self) -> MarkerClassifier {
        MarkerClassifier::new(self.classification_rule, self.circle_style)
    }
}
