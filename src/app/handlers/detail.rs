//! Handler für den Detail-Dialog.

use crate::app::use_cases;
use crate::app::AppState;

/// Öffnet den Detail-Dialog, Fehler bei unbekanntem Feature.
pub fn open(state: &mut AppState, feature_index: usize) -> anyhow::Result<()> {
    use_cases::detail::open(state, feature_index)
}

/// Schließt den Detail-Dialog.
pub fn close(state: &mut AppState) {
    use_cases::detail::close(state);
}
