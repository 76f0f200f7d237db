//! Use-Case-Funktionen für Routenwechsel.

use crate::app::route::Route;
use crate::app::AppState;
use crate::layers::BaseLayer;

/// Betritt eine bereits freigegebene Route.
///
/// Ein Wechsel des Projekts verwirft Layer und entwertet laufende Ladevorgänge.
pub fn enter_route(state: &mut AppState, route: Route) {
    let default_viewport = state.options.default_viewport();

    match &route {
        Route::ProjectMap { project_id, style } => {
            if state.view.project_id != Some(*project_id) {
                state.view.reset(default_viewport);
                state.view.project_id = Some(*project_id);
            }
            state.view.style = style.clone();
            state.view.base_layer = BaseLayer::from_style(style.as_deref());
        }
        Route::ProjectList | Route::NotFound => {
            if state.view.project_id.is_some() {
                state.view.reset(default_viewport);
                state.view.project_id = None;
                state.view.style = None;
            }
        }
    }

    state.ui.detail = None;
    log::info!("Entered {}", route.path());
    state.route = Some(route);
}

/// Zeigt die Umleitungsroute und meldet die verweigerte Route.
pub fn deny_route(state: &mut AppState, requested: &Route, redirect: Route) {
    state.ui.error_message = Some(format!("Access to {} denied", requested.path()));
    enter_route(state, redirect);
}
