//! Composition-Root: verdrahtet Transport, Session, Guard und API-Client.

use std::sync::Arc;

use crate::api::{AuthEndpoint, GeoApiClient, HttpTransport};
use crate::session::{CredentialInjector, RouteGuard, SessionStore};

/// Session-Store mit dem Auth-Endpunkt des Backends.
pub type ViewerSession<T> = SessionStore<AuthEndpoint<T>>;

/// API-Client, der den Session-Token an jeden Request hängt.
pub type ViewerClient<T> = GeoApiClient<CredentialInjector<T, AuthEndpoint<T>>>;

/// Alle Dienste, die der Controller braucht. Ein Session-Kontext pro Prozess.
pub struct ViewerServices<T> {
    pub session: Arc<ViewerSession<T>>,
    pub guard: RouteGuard<AuthEndpoint<T>>,
    pub client: ViewerClient<T>,
}

impl<T: HttpTransport + Clone> ViewerServices<T> {
    /// Baut alle Dienste über demselben Transport.
    pub fn new(transport: T) -> Self {
        let session = Arc::new(SessionStore::new(AuthEndpoint::new(transport.clone())));
        let guard = RouteGuard::new(Arc::clone(&session));
        let client = GeoApiClient::new(CredentialInjector::new(transport, Arc::clone(&session)));

        Self {
            session,
            guard,
            client,
        }
    }
}
