//! Application Controller für zentrale Event-Verarbeitung.

use super::services::ViewerServices;
use super::use_cases::features::{LoadOutcome, LoadTicket};
use super::{AppCommand, AppIntent, AppState};
use crate::api::HttpTransport;
use crate::core::{FeatureCollection, ViewerError};

/// Orchestriert Intents, Guard, Abrufe und Use-Cases auf den AppState.
pub struct AppController<T> {
    services: ViewerServices<T>,
}

impl<T: HttpTransport> AppController<T> {
    /// Erstellt einen Controller über den gegebenen Diensten.
    pub fn new(services: ViewerServices<T>) -> Self {
        Self { services }
    }

    /// Zugriff auf Session, Guard und Client.
    pub fn services(&self) -> &ViewerServices<T> {
        &self.services
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    ///
    /// `LoadFeatures` hält den State bis zum Ende des Abrufs. Hosts, die
    /// währenddessen weiter Intents verarbeiten wollen, nutzen
    /// `begin_feature_load` / `fetch_features` / `complete_feature_load`;
    /// der Controller lässt sich dafür geteilt ausleihen.
    pub async fn handle_intent(
        &self,
        state: &mut AppState,
        intent: AppIntent,
    ) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command).await?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub async fn handle_command(
        &self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Navigation & Daten ===
            AppCommand::Navigate { route } => {
                handlers::navigation::navigate(state, &self.services.guard, route).await
            }
            AppCommand::LoadProjects => {
                handlers::data::load_projects(state, &self.services.client).await
            }
            AppCommand::LoadFeatures { project_id } => {
                handlers::data::load_features(state, &self.services.client, project_id).await
            }

            // === Detail-Dialog ===
            AppCommand::OpenDetail { feature_index } => {
                handlers::detail::open(state, feature_index)?
            }
            AppCommand::CloseDetail => handlers::detail::close(state),

            // === Viewport ===
            AppCommand::ZoomToBounds { bounds } => handlers::view::zoom_to_bounds(state, bounds),
            AppCommand::SetZoom { zoom } => handlers::view::set_zoom(state, zoom),
            AppCommand::SetViewportSize { size } => handlers::view::set_viewport_size(state, size),
            AppCommand::FitToLayers => handlers::view::fit_to_layers(state),
        }

        Ok(())
    }

    /// Startet einen Ladevorgang manuell (Abruf separat über `fetch_features`).
    pub fn begin_feature_load(&self, state: &mut AppState, project_id: u64) -> LoadTicket {
        super::use_cases::features::begin_load(state, project_id)
    }

    /// Ruft die Features zu einem Ticket ab, ohne den State zu berühren.
    pub async fn fetch_features(
        &self,
        ticket: &LoadTicket,
    ) -> Result<FeatureCollection, ViewerError> {
        self.services.client.fetch_features(ticket.project_id).await
    }

    /// Übernimmt ein Abrufergebnis, veraltete Tickets werden verworfen.
    pub fn complete_feature_load(
        &self,
        state: &mut AppState,
        ticket: LoadTicket,
        result: Result<FeatureCollection, ViewerError>,
    ) -> LoadOutcome {
        super::use_cases::features::finish_load(state, ticket, result)
    }
}
