//! Handler für Datenabrufe (Projektliste, Features).

use crate::api::{GeoApiClient, HttpTransport};
use crate::app::route::Route;
use crate::app::use_cases;
use crate::app::AppState;

/// Lädt die Projektliste, sofern die Projektlisten-Route aktiv ist.
pub async fn load_projects<C: HttpTransport>(state: &mut AppState, client: &GeoApiClient<C>) {
    if state.route != Some(Route::ProjectList) {
        log::warn!("Project list not active, skipping project fetch");
        return;
    }

    let result = client.fetch_projects().await;
    use_cases::projects::apply_projects(state, result);
}

/// Lädt die Features eines Projekts, sofern dessen Kartenroute aktiv ist.
///
/// Hält `state` über den Abruf hinweg; für parallele Navigation siehe
/// `AppController::fetch_features`.
pub async fn load_features<C: HttpTransport>(
    state: &mut AppState,
    client: &GeoApiClient<C>,
    project_id: u64,
) {
    if state.current_project_id() != Some(project_id) {
        log::warn!("Map of project {project_id} not active, skipping feature fetch");
        return;
    }

    let ticket = use_cases::features::begin_load(state, project_id);
    let result = client.fetch_features(project_id).await;
    use_cases::features::finish_load(state, ticket, result);
}
