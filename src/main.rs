//! GeoAPI Viewer.
//!
//! Kommandozeilen-Host für den Kartenviewer: Projekte auflisten, Karten-Layer
//! eines Projekts aufbauen und Feature-Details anzeigen.

mod cli;

use clap::Parser;
use geoapi_viewer::app::AppCommand;
use geoapi_viewer::layers::BaseLayer;
use geoapi_viewer::{
    AppController, AppIntent, AppState, ReqwestTransport, Route, ViewerOptions, ViewerServices,
};

use cli::{Args, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    AppRunner::run(Args::parse()).await
}

struct AppRunner {
    state: AppState,
    controller: AppController<ReqwestTransport>,
}

impl AppRunner {
    async fn run(args: Args) -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("GeoAPI Viewer v{} startet...", env!("CARGO_PKG_VERSION"));

        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = args.config.clone().unwrap_or_else(ViewerOptions::config_path);
        let mut options = ViewerOptions::load_from_file(&config_path);
        if let Some(base_url) = args.base_url {
            options.api_base_url = base_url;
        }

        if let Command::WriteConfig = args.command {
            return options.save_to_file(&config_path);
        }

        let transport = ReqwestTransport::new(&options.api_base_url, options.request_timeout())?;
        let mut runner = Self {
            state: AppState::with_options(options),
            controller: AppController::new(ViewerServices::new(transport)),
        };

        match args.command {
            Command::Projects => {
                runner.dispatch(navigate(Route::ProjectList)).await;
                runner.print_projects();
            }
            Command::Map {
                project_id,
                style,
                zoom,
            } => {
                runner
                    .dispatch(navigate(Route::ProjectMap { project_id, style }))
                    .await;
                if let Some(zoom) = zoom {
                    runner.dispatch(AppIntent::ZoomChanged { zoom }).await;
                }
                runner.print_map();
            }
            Command::Detail {
                project_id,
                feature_index,
            } => {
                runner
                    .dispatch(navigate(Route::ProjectMap {
                        project_id,
                        style: None,
                    }))
                    .await;
                if runner.state.view.layers.is_some() {
                    runner.command(AppCommand::OpenDetail { feature_index }).await;
                }
                runner.print_detail();
            }
            Command::WriteConfig => {}
        }

        match runner.state.ui.error_message.take() {
            Some(message) => anyhow::bail!(message),
            None => Ok(()),
        }
    }

    async fn dispatch(&mut self, intent: AppIntent) {
        if let Err(e) = self.controller.handle_intent(&mut self.state, intent).await {
            log::error!("Event handling failed: {:#}", e);
            self.state.ui.error_message = Some(format!("{e:#}"));
        }
    }

    async fn command(&mut self, command: AppCommand) {
        if let Err(e) = self.controller.handle_command(&mut self.state, command).await {
            log::error!("Command failed: {:#}", e);
            self.state.ui.error_message = Some(format!("{e:#}"));
        }
    }

    fn print_projects(&self) {
        for project in self.state.projects.iter().flatten() {
            match &project.description {
                Some(description) => println!("{:>6}  {}  {}", project.id, project.name, description),
                None => println!("{:>6}  {}", project.id, project.name),
            }
        }
    }

    fn print_map(&self) {
        let view = &self.state.view;
        if let Some(status) = &self.state.ui.status_message {
            println!("{status}");
        }
        println!(
            "Viewport: center ({:.6}, {:.6}), zoom {}",
            view.viewport.center.y, view.viewport.center.x, view.viewport.zoom
        );
        println!(
            "Base map: {:?} ({})",
            view.base_layer,
            view.base_layer.attribution()
        );
        println!("Center tile: {}", center_tile(view.base_layer, &self.state));

        let Some(layers) = &view.layers else {
            return;
        };

        let clusters = layers
            .cluster_layer
            .clusters_at(view.viewport.zoom, &self.state.options.cluster_options());
        for cluster in &clusters {
            if cluster.is_single() {
                let item = &layers.cluster_layer.items[cluster.members[0]];
                println!(
                    "  marker  #{:<5} {:<10} ({:.6}, {:.6})",
                    item.feature_index,
                    item.marker.label(),
                    item.position.y,
                    item.position.x
                );
            } else {
                println!(
                    "  cluster {:>6} markers   ({:.6}, {:.6})",
                    cluster.count(),
                    cluster.center.y,
                    cluster.center.x
                );
            }
        }
        for shape in &layers.shape_layer.items {
            println!("  shape   #{:<5} {:?}", shape.feature_index, shape.kind);
        }
        if !layers.skipped.is_empty() {
            println!("  skipped {:?}", layers.skipped);
        }
    }

    fn print_detail(&self) {
        let Some(detail) = &self.state.ui.detail else {
            return;
        };

        println!("{}", detail.title());
        if let Some(kind) = detail.geometry_kind {
            println!("Geometry: {kind:?}");
        }
        for image in &detail.gallery {
            println!("  image #{}: {} (thumb {})", image.asset_id, image.image_url, image.thumbnail_url);
        }
        for row in &detail.properties {
            println!("  {:<20} {}", row.key, row.value);
        }
    }
}

fn navigate(route: Route) -> AppIntent {
    AppIntent::NavigateRequested { path: route.path() }
}

fn center_tile(base_layer: BaseLayer, state: &AppState) -> String {
    let viewport = state.view.viewport;
    base_layer.tile_url(viewport.center, viewport.zoom)
}
