//! Session-Token-Speicher mit Single-Flight-Authentifizierung.
//!
//! Zustandsmaschine: `Unauthenticated → Pending → Authenticated`.
//! `Authenticated` ist terminal. Ein fehlgeschlagener oder abgebrochener
//! Versuch führt zurück nach `Unauthenticated`, ein neuer Versuch ist erlaubt.

use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::core::ViewerError;

/// Opaker Session-Token (Inhalt des `jwt`-Felds).
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Erstellt einen Token.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Token als Header-Wert.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Beschafft einen neuen Token (genau ein Auth-Request pro Aufruf).
pub trait Authenticator {
    fn authenticate(&self) -> impl Future<Output = Result<SessionToken, ViewerError>>;
}

/// Öffentlich sichtbarer Zustand des Stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Pending,
    Authenticated,
}

/// `None` solange der Auth-Request läuft.
type AuthOutcome = Option<Result<(), ViewerError>>;

enum AuthState {
    Unauthenticated,
    Pending(watch::Receiver<AuthOutcome>),
    Authenticated(SessionToken),
}

enum Role {
    Leader(watch::Sender<AuthOutcome>),
    Waiter(watch::Receiver<AuthOutcome>),
}

/// Setzt `Pending` zurück, wenn der führende Aufrufer abgebrochen wird.
struct PendingGuard<'a> {
    state: &'a Mutex<AuthState>,
    armed: bool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(*state, AuthState::Pending(_)) {
            log::warn!("Authentication aborted before completion");
            *state = AuthState::Unauthenticated;
        }
    }
}

/// Prozessweiter Session-Kontext.
///
/// Wird an der Composition-Root erzeugt und per `Arc` an Injector, Guard und
/// Controller weitergegeben.
pub struct SessionStore<A> {
    authenticator: A,
    state: Mutex<AuthState>,
}

impl<A> SessionStore<A> {
    /// Erstellt einen leeren Store (`Unauthenticated`).
    pub fn new(authenticator: A) -> Self {
        Self {
            authenticator,
            state: Mutex::new(AuthState::Unauthenticated),
        }
    }

    /// Zugriff auf den Authenticator.
    pub fn authenticator(&self) -> &A {
        &self.authenticator
    }

    /// Aktueller Token, falls vorhanden.
    pub fn current(&self) -> Option<SessionToken> {
        match &*self.lock_state() {
            AuthState::Authenticated(token) => Some(token.clone()),
            _ => None,
        }
    }

    /// Übernimmt einen außerhalb beschafften Token.
    pub fn set_token(&self, token: SessionToken) {
        *self.lock_state() = AuthState::Authenticated(token);
    }

    pub fn status(&self) -> SessionStatus {
        match &*self.lock_state() {
            AuthState::Unauthenticated => SessionStatus::Unauthenticated,
            AuthState::Pending(_) => SessionStatus::Pending,
            AuthState::Authenticated(_) => SessionStatus::Authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::Authenticated
    }

    fn lock_state(&self) -> MutexGuard<'_, AuthState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A: Authenticator> SessionStore<A> {
    /// Stellt sicher, dass ein Token vorliegt.
    ///
    /// Mit Token: sofort `Ok`, ohne Netzwerk. Ohne Token: genau ein
    /// Auth-Request, gleichzeitige Aufrufer warten auf dasselbe Ergebnis.
    pub async fn ensure_authenticated(&self) -> Result<(), ViewerError> {
        let role = {
            let mut state = self.lock_state();
            match &*state {
                AuthState::Authenticated(_) => return Ok(()),
                AuthState::Pending(receiver) => Role::Waiter(receiver.clone()),
                AuthState::Unauthenticated => {
                    let (sender, receiver) = watch::channel(None);
                    *state = AuthState::Pending(receiver);
                    Role::Leader(sender)
                }
            }
        };

        match role {
            Role::Waiter(mut receiver) => {
                let outcome = receiver
                    .wait_for(Option::is_some)
                    .await
                    .map(|outcome| (*outcome).clone())
                    .map_err(|_| ViewerError::AuthFailed("authentication aborted".into()))?;
                outcome.unwrap_or_else(|| {
                    Err(ViewerError::AuthFailed("authentication aborted".into()))
                })
            }
            Role::Leader(sender) => {
                let mut guard = PendingGuard {
                    state: &self.state,
                    armed: true,
                };
                let result = self.authenticator.authenticate().await;
                guard.armed = false;

                let outcome = {
                    let mut state = self.lock_state();
                    match result {
                        Ok(token) => {
                            log::info!("Session authenticated");
                            *state = AuthState::Authenticated(token);
                            Ok(())
                        }
                        Err(e) => {
                            log::warn!("{e}");
                            if matches!(*state, AuthState::Pending(_)) {
                                *state = AuthState::Unauthenticated;
                            }
                            Err(e)
                        }
                    }
                };

                sender.send_replace(Some(outcome.clone()));
                outcome
            }
        }
    }
}
