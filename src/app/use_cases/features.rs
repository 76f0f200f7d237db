//! Use-Case-Funktionen für das Laden der Features eines Projekts.
//!
//! Ein Ladevorgang besteht aus `begin_load` → Abruf → `finish_load`.
//! Der Abruf braucht keinen State, dazwischen kann weiter navigiert werden.

use std::sync::Arc;

use crate::app::AppState;
use crate::core::{FeatureCollection, ViewerError};
use crate::layers::LayerAssembler;

/// Kennzeichnet einen Ladevorgang (Projekt + Generation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub project_id: u64,
    pub generation: u64,
}

/// Was mit einem Abrufergebnis passiert ist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Layer installiert
    Applied,
    /// Fehler angezeigt, leere Karte mit Standard-Viewport
    Failed,
    /// Ergebnis gehört zu einer verlassenen Ansicht
    Discarded,
}

/// Startet einen Ladevorgang und entwertet alle vorherigen.
pub fn begin_load(state: &mut AppState, project_id: u64) -> LoadTicket {
    state.view.generation += 1;
    state.view.project_id = Some(project_id);
    state.view.loading = true;
    state.ui.error_message = None;
    state.ui.status_message = Some(format!("Loading features of project {project_id}…"));

    LoadTicket {
        project_id,
        generation: state.view.generation,
    }
}

/// Gibt `true` zurück, wenn das Ticket noch zur angezeigten Karte gehört.
pub fn is_current(state: &AppState, ticket: &LoadTicket) -> bool {
    state.view.generation == ticket.generation && state.view.project_id == Some(ticket.project_id)
}

/// Übernimmt das Abrufergebnis, sofern das Ticket noch aktuell ist.
pub fn finish_load(
    state: &mut AppState,
    ticket: LoadTicket,
    result: Result<FeatureCollection, ViewerError>,
) -> LoadOutcome {
    if !is_current(state, &ticket) {
        log::info!(
            "Discarding stale features of project {} (generation {})",
            ticket.project_id,
            ticket.generation
        );
        return LoadOutcome::Discarded;
    }

    state.view.loading = false;
    state.ui.detail = None;

    match result {
        Ok(collection) => {
            let assembler = LayerAssembler::new(
                state.options.classifier(),
                state.options.fit_options(state.view.viewport_size),
                state.options.default_viewport(),
            );
            let layers = assembler.assemble(Arc::new(collection));

            let mut status = format!(
                "{} features ({} points, {} shapes)",
                layers.collection.len(),
                layers.cluster_layer.len(),
                layers.shape_layer.len()
            );
            if !layers.skipped.is_empty() {
                status.push_str(&format!(", {} without geometry", layers.skipped.len()));
            }

            state.view.viewport = layers.viewport;
            state.view.layers = Some(layers);
            state.ui.status_message = Some(status);
            LoadOutcome::Applied
        }
        Err(e) => {
            log::error!("Loading features of project {} failed: {e}", ticket.project_id);
            state.view.layers = None;
            state.view.viewport = state.options.default_viewport();
            state.ui.status_message = None;
            state.ui.error_message = Some(e.to_string());
            LoadOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Feature, MapViewport};

    fn collection() -> FeatureCollection {
        FeatureCollection::new(vec![Feature::point(-80.0, 40.0), Feature::point(-80.01, 40.01)])
    }

    #[test]
    fn successful_load_installs_layers() {
        let mut state = AppState::new();
        let ticket = begin_load(&mut state, 42);
        assert!(state.view.loading);

        let outcome = finish_load(&mut state, ticket, Ok(collection()));

        assert_eq!(outcome, LoadOutcome::Applied);
        assert!(!state.view.loading);
        assert_eq!(state.rendered_count(), 2);
        assert!(state.view.viewport.zoom > MapViewport::DEFAULT_ZOOM - 5.0);
        assert!(state.ui.error_message.is_none());
    }

    #[test]
    fn failed_load_shows_error_and_default_viewport() {
        let mut state = AppState::new();
        let ticket = begin_load(&mut state, 42);

        let outcome = finish_load(
            &mut state,
            ticket,
            Err(ViewerError::FetchFailed("status 500".into())),
        );

        assert_eq!(outcome, LoadOutcome::Failed);
        assert!(state.view.layers.is_none());
        assert_eq!(state.view.viewport, MapViewport::default());
        assert!(state.ui.error_message.as_deref().is_some_and(|m| m.contains("500")));
    }

    #[test]
    fn newer_load_discards_older_result() {
        let mut state = AppState::new();
        let first = begin_load(&mut state, 1);
        let second = begin_load(&mut state, 2);

        assert_eq!(finish_load(&mut state, first, Ok(collection())), LoadOutcome::Discarded);
        assert!(state.view.layers.is_none());
        assert!(state.view.loading);

        assert_eq!(finish_load(&mut state, second, Ok(collection())), LoadOutcome::Applied);
    }
}
