//! Use-Case-Funktionen für die Projektliste.

use crate::app::AppState;
use crate::core::{Project, ViewerError};

/// Übernimmt das Ergebnis des Projektabrufs.
pub fn apply_projects(state: &mut AppState, result: Result<Vec<Project>, ViewerError>) {
    match result {
        Ok(projects) => {
            log::info!("{} projects loaded", projects.len());
            state.ui.status_message = Some(format!("{} projects", projects.len()));
            state.ui.error_message = None;
            state.projects = Some(projects);
        }
        Err(e) => {
            log::error!("Loading projects failed: {e}");
            state.ui.error_message = Some(e.to_string());
        }
    }
}
