//! Hängt den Session-Token an jeden ausgehenden API-Request.

use std::sync::Arc;

use super::store::SessionStore;
use crate::api::transport::{ApiRequest, ApiResponse, HttpTransport, TransportError};

/// Header, in dem das Backend den Token erwartet.
pub const JWT_HEADER: &str = "X-JWT-Assertion";

/// Transport-Dekorator: setzt `X-JWT-Assertion`, sobald ein Token vorliegt.
///
/// Löst nie selbst eine Authentifizierung aus; ohne Token geht der Request
/// unverändert raus.
pub struct CredentialInjector<T, A> {
    inner: T,
    session: Arc<SessionStore<A>>,
}

impl<T, A> CredentialInjector<T, A> {
    /// Umhüllt `inner` mit dem Token aus `session`.
    pub fn new(inner: T, session: Arc<SessionStore<A>>) -> Self {
        Self { inner, session }
    }

    /// Der umhüllte Transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: HttpTransport, A> HttpTransport for CredentialInjector<T, A> {
    async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, TransportError> {
        if let Some(token) = self.session.current() {
            request.set_header(JWT_HEADER, token.as_str());
        }
        self.inner.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ViewerError;
    use crate::session::store::{Authenticator, SessionToken};
    use std::cell::RefCell;

    struct NoAuth;

    impl Authenticator for NoAuth {
        async fn authenticate(&self) -> Result<SessionToken, ViewerError> {
            Err(ViewerError::AuthFailed("disabled".into()))
        }
    }

    #[derive(Default)]
    struct Recorder {
        requests: RefCell<Vec<ApiRequest>>,
    }

    impl HttpTransport for Recorder {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            self.requests.borrow_mut().push(request);
            Ok(ApiResponse::new(200, "[]"))
        }
    }

    #[tokio::test]
    async fn header_is_set_when_token_present() {
        let session = Arc::new(SessionStore::new(NoAuth));
        session.set_token(SessionToken::new("abc"));
        let injector = CredentialInjector::new(Recorder::default(), session);

        injector
            .send(ApiRequest::get("/api/projects/"))
            .await
            .expect("Antwort erwartet");

        let requests = injector.inner().requests.borrow();
        assert_eq!(requests[0].header(JWT_HEADER), Some("abc"));
        assert_eq!(requests[0].path, "/api/projects/");
    }

    #[tokio::test]
    async fn header_is_omitted_without_token() {
        let session = Arc::new(SessionStore::new(NoAuth));
        let injector = CredentialInjector::new(Recorder::default(), session.clone());

        injector
            .send(ApiRequest::get("/api/projects/"))
            .await
            .expect("Antwort erwartet");

        let requests = injector.inner().requests.borrow();
        assert_eq!(requests[0].header(JWT_HEADER), None);
        assert!(requests[0].headers.is_empty());
        assert!(!session.is_authenticated());
    }
}
