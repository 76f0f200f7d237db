//! Application State: Route, Projektliste, Kartenansicht und UI.

mod app_state;
pub mod detail;
mod ui;
mod view;

pub use app_state::AppState;
pub use detail::{DetailView, GalleryImage, PropertyRow};
pub use ui::UiState;
pub use view::MapViewState;
