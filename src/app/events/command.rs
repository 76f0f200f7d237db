use glam::DVec2;

use crate::app::route::Route;
use crate::core::GeoBounds;

/// Commands sind mutierende Operationen, die zentral ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Route nach Guard-Prüfung betreten
    Navigate { route: Route },
    /// Projektliste laden (nur auf der Projektlisten-Route)
    LoadProjects,
    /// Features eines Projekts laden (nur auf dessen Kartenroute)
    LoadFeatures { project_id: u64 },
    /// Detail-Dialog für ein Feature öffnen
    OpenDetail { feature_index: usize },
    /// Detail-Dialog schließen
    CloseDetail,
    /// Auf Bounds hineinzoomen (Klick auf Cluster)
    ZoomToBounds { bounds: GeoBounds },
    /// Zoom-Stufe setzen (geklemmt)
    SetZoom { zoom: f64 },
    /// Viewport-Größe in Pixeln setzen
    SetViewportSize { size: DVec2 },
    /// Viewport auf die Bounds der Layer einpassen
    FitToLayers,
}
