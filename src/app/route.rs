//! Routen-Tabelle der Anwendung.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

/// Basis für das Zerlegen und Kodieren von Query-Strings.
const QUERY_BASE: &str = "http://viewer.invalid/";

static PROJECT_MAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/projects/(\d+)/?$").expect("gültiges Regex"));
static PROJECT_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/projects/?$").expect("gültiges Regex"));
static NOT_FOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/404/?$").expect("gültiges Regex"));

/// Navigationsziel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Projektliste (geschützt)
    ProjectList,
    /// Karte eines Projekts (geschützt), `style` aus `?style=`
    ProjectMap { project_id: u64, style: Option<String> },
    /// Fehlerseite (öffentlich)
    NotFound,
}

impl Route {
    /// Löst einen Pfad auf, inklusive Weiterleitungen.
    ///
    /// Leerer Pfad und `/` führen zur Projektliste, unbekannte Pfade zu `NotFound`.
    pub fn resolve(path: &str) -> Route {
        let (location, _) = split_query(path);
        if location.is_empty() || location == "/" {
            log::debug!("Redirect '{path}' → /projects");
            return Route::ProjectList;
        }

        Route::parse(path).unwrap_or_else(|| {
            log::warn!("Unknown path '{path}', redirecting to /404");
            Route::NotFound
        })
    }

    /// Exakter Tabellen-Treffer ohne Weiterleitungen.
    pub fn parse(path: &str) -> Option<Route> {
        let (location, query) = split_query(path);

        if let Some(captures) = PROJECT_MAP.captures(location) {
            let project_id = captures[1].parse().ok()?;
            let style = query.and_then(|q| query_param(q, "style"));
            return Some(Route::ProjectMap { project_id, style });
        }
        if PROJECT_LIST.is_match(location) {
            return Some(Route::ProjectList);
        }
        if NOT_FOUND.is_match(location) {
            return Some(Route::NotFound);
        }
        None
    }

    /// Kanonischer Pfad der Route.
    pub fn path(&self) -> String {
        match self {
            Route::ProjectList => "/projects".to_string(),
            Route::ProjectMap {
                project_id,
                style: Some(style),
            } => match encode_query_param("style", style) {
                Some(query) => format!("/projects/{project_id}?{query}"),
                None => format!("/projects/{project_id}"),
            },
            Route::ProjectMap { project_id, .. } => format!("/projects/{project_id}"),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Geschützte Routen brauchen eine authentifizierte Session.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::ProjectList | Route::ProjectMap { .. })
    }

    /// Projekt-ID einer Kartenroute.
    pub fn project_id(&self) -> Option<u64> {
        match self {
            Route::ProjectMap { project_id, .. } => Some(*project_id),
            _ => None,
        }
    }
}

fn split_query(path: &str) -> (&str, Option<&str>) {
    match path.split_once('?') {
        Some((location, query)) => (location, Some(query)),
        None => (path, None),
    }
}

/// Wert eines Query-Parameters, percent- und `+`-dekodiert.
fn query_param(query: &str, name: &str) -> Option<String> {
    let mut url = Url::parse(QUERY_BASE).ok()?;
    url.set_query(Some(query));
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn encode_query_param(name: &str, value: &str) -> Option<String> {
    let mut url = Url::parse(QUERY_BASE).ok()?;
    url.query_pairs_mut().append_pair(name, value);
    url.query().map(str::to_string)
}
