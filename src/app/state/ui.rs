use super::detail::DetailView;

/// UI-bezogener Anwendungszustand
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Temporäre Statusnachricht (z.B. "Lade Features…")
    pub status_message: Option<String>,
    /// Sichtbare Fehlermeldung des letzten fehlgeschlagenen Vorgangs
    pub error_message: Option<String>,
    /// Offener Detail-Dialog
    pub detail: Option<DetailView>,
}

impl UiState {
    /// Erstellt den Standard-UI-Zustand (kein Dialog offen).
    pub fn new() -> Self {
        Self::default()
    }
}
