//! Session-Kontext: Token-Speicher, Request-Dekorator und Routen-Guard.

pub mod guard;
pub mod injector;
pub mod store;

pub use guard::{GuardDecision, RouteGuard};
pub use injector::{CredentialInjector, JWT_HEADER};
pub use store::{Authenticator, SessionStatus, SessionStore, SessionToken};
