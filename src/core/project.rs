use serde::{Deserialize, Serialize};

/// Projekt-Stammdaten aus `GET /api/projects/`. Identität ist `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    #[serde(default)]
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
