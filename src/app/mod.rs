//! Application-Layer: Controller, State, Events und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod route;
pub mod services;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Route, geladene Layer, Dialoge).
pub mod state;
pub mod use_cases;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use route::Route;
pub use services::{ViewerClient, ViewerServices, ViewerSession};
pub use state::{AppState, DetailView, MapViewState, UiState};
pub use use_cases::features::{LoadOutcome, LoadTicket};
