use glam::DVec2;

use crate::layers::ItemRef;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone, PartialEq)]
pub enum AppIntent {
    /// Navigation zu einem Pfad (inkl. Query), z.B. `/projects/42?style=satellite`
    NavigateRequested { path: String },
    /// Marker oder Form wurde direkt angeklickt
    MarkerClicked { item: ItemRef },
    /// Klick auf die Karte an Lon/Lat-Position
    MapClicked { position: DVec2 },
    /// Zoom-Stufe wurde vom Nutzer geändert
    ZoomChanged { zoom: f64 },
    /// Viewport-Größe hat sich geändert
    ViewportResized { size: DVec2 },
    /// Kartenausschnitt auf alle Layer einpassen
    FitToLayersRequested,
    /// Detail-Dialog geschlossen
    DetailClosed,
    /// Aktuelle Ansicht neu laden
    ReloadRequested,
}
