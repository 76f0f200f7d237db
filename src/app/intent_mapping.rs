//! Mapping von UI-Intents auf mutierende App-Commands.

use super::route::Route;
use super::{AppCommand, AppIntent, AppState};
use crate::layers::PickResult;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::NavigateRequested { path } => {
            let route = Route::resolve(&path);
            let follow_up = match &route {
                Route::ProjectMap { project_id, .. } => Some(AppCommand::LoadFeatures {
                    project_id: *project_id,
                }),
                Route::ProjectList => Some(AppCommand::LoadProjects),
                Route::NotFound => None,
            };

            std::iter::once(AppCommand::Navigate { route })
                .chain(follow_up)
                .collect()
        }
        AppIntent::MarkerClicked { item } => state
            .view
            .layers
            .as_ref()
            .and_then(|layers| layers.feature_index(item))
            .map(|feature_index| vec![AppCommand::OpenDetail { feature_index }])
            .unwrap_or_default(),
        AppIntent::MapClicked { position } => {
            let Some(layers) = state.view.layers.as_ref() else {
                return Vec::new();
            };
            let hit = layers.pick(
                position,
                state.view.viewport.zoom,
                state.options.pick_radius_px,
                &state.options.cluster_options(),
            );

            match hit {
                Some(PickResult::Feature { feature_index, .. }) => {
                    vec![AppCommand::OpenDetail { feature_index }]
                }
                Some(PickResult::Cluster { bounds, .. }) => vec![AppCommand::ZoomToBounds { bounds }],
                None => Vec::new(),
            }
        }
        AppIntent::ZoomChanged { zoom } => vec![AppCommand::SetZoom { zoom }],
        AppIntent::ViewportResized { size } => vec![AppCommand::SetViewportSize { size }],
        AppIntent::FitToLayersRequested => vec![AppCommand::FitToLayers],
        AppIntent::DetailClosed => vec![AppCommand::CloseDetail],
        AppIntent::ReloadRequested => match &state.route {
            Some(Route::ProjectMap { project_id, .. }) => vec![AppCommand::LoadFeatures {
                project_id: *project_id,
            }],
            Some(Route::ProjectList) => vec![AppCommand::LoadProjects],
            _ => Vec::new(),
        },
    }
}
