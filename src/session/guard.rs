//! Zugangsprüfung für geschützte Routen.

use std::sync::Arc;

use super::store::{Authenticator, SessionStore};
use crate::app::route::Route;

/// Ergebnis der Zugangsprüfung.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Zugang verweigert, stattdessen diese Route anzeigen
    Redirect(Route),
}

/// Lässt geschützte Routen erst nach erfolgreicher Authentifizierung zu.
pub struct RouteGuard<A> {
    session: Arc<SessionStore<A>>,
}

impl<A: Authenticator> RouteGuard<A> {
    pub fn new(session: Arc<SessionStore<A>>) -> Self {
        Self { session }
    }

    /// Prüft den Zugang. Öffentliche Routen passieren ohne Netzwerk.
    pub async fn can_enter(&self, route: &Route) -> GuardDecision {
        if !route.is_protected() {
            return GuardDecision::Allow;
        }

        match self.session.ensure_authenticated().await {
            Ok(()) => GuardDecision::Allow,
            Err(e) => {
                log::warn!("Access to {} denied: {e}", route.path());
                GuardDecision::Redirect(Route::NotFound)
            }
        }
    }
}
