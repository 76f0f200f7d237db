//! Handler für Routenwechsel mit Zugangsprüfung.

use crate::app::route::Route;
use crate::app::use_cases;
use crate::app::AppState;
use crate::session::{Authenticator, GuardDecision, RouteGuard};

/// Prüft die Route am Guard und betritt sie oder die Umleitung.
pub async fn navigate<A: Authenticator>(state: &mut AppState, guard: &RouteGuard<A>, route: Route) {
    match guard.can_enter(&route).await {
        GuardDecision::Allow => use_cases::navigation::enter_route(state, route),
        GuardDecision::Redirect(redirect) => {
            use_cases::navigation::deny_route(state, &route, redirect)
        }
    }
}
