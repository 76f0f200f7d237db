use crate::app::route::Route;
use crate::app::CommandLog;
use crate::core::Project;
use crate::shared::ViewerOptions;

use super::{MapViewState, UiState};

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Aktuell angezeigte Route (None vor der ersten Navigation)
    pub route: Option<Route>,
    /// Projektliste (None = noch nicht geladen)
    pub projects: Option<Vec<Project>>,
    /// Kartenansicht
    pub view: MapViewState,
    /// UI-State
    pub ui: UiState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen
    pub options: ViewerOptions,
}

impl AppState {
    /// Erstellt einen neuen, leeren AppState mit Standardoptionen.
    pub fn new() -> Self {
        Self::with_options(ViewerOptions::default())
    }

    /// Erstellt einen leeren AppState mit gegebenen Optionen.
    ///
    /// Unbrauchbare Karten-Grenzen werden dabei durch Standardwerte ersetzt.
    pub fn with_options(options: ViewerOptions) -> Self {
        let options = options.validated();
        Self {
            route: None,
            projects: None,
            view: MapViewState::new(&options),
            ui: UiState::new(),
            command_log: CommandLog::new(),
            options,
        }
    }

    /// Projekt der aktuell angezeigten Kartenroute.
    pub fn current_project_id(&self) -> Option<u64> {
        self.route.as_ref().and_then(Route::project_id)
    }

    /// Anzahl der dargestellten Karten-Elemente (für Statusanzeige).
    pub fn rendered_count(&self) -> usize {
        self.view.layers.as_ref().map_or(0, |layers| layers.rendered_count())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
