//! Use-Cases: fachliche Operationen auf dem AppState.

pub mod detail;
pub mod features;
pub mod navigation;
pub mod projects;
pub mod viewport;
