//! Use-Case-Funktionen für den Detail-Dialog.

use crate::app::state::DetailView;
use crate::app::AppState;

/// Öffnet den Detail-Dialog für ein Feature der geladenen Collection.
pub fn open(state: &mut AppState, feature_index: usize) -> anyhow::Result<()> {
    let feature = state
        .view
        .layers
        .as_ref()
        .and_then(|layers| layers.collection.get(feature_index))
        .ok_or_else(|| anyhow::anyhow!("Feature #{feature_index} is not loaded"))?;

    let detail = DetailView::from_feature(feature_index, feature);
    log::debug!("Opening detail of {}", detail.title());
    state.ui.detail = Some(detail);
    Ok(())
}

/// Schließt den Detail-Dialog.
pub fn close(state: &mut AppState) {
    state.ui.detail = None;
}
