// salon-client/src/session.rs
// Session store - who is signed in, shared by handle

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use http::{Method, StatusCode};
use shared::models::{Role, UserInfo};
use tokio::sync::{OnceCell, watch};

use crate::ClientResult;
use crate::http::ResponseInterceptor;
use crate::token::TokenStore;

/// Authentication state of the process
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// Startup identity fetch has not resolved yet
    #[default]
    Unchecked,
    /// Check complete, nobody signed in
    Anonymous,
    /// Valid token and a successful identity fetch
    Authenticated(UserInfo),
}

impl SessionState {
    pub fn current_user(&self) -> Option<&UserInfo> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// False only before the startup check resolves
    pub fn auth_check_complete(&self) -> bool {
        !matches!(self, Self::Unchecked)
    }

    pub fn role(&self) -> Option<Role> {
        self.current_user().map(|u| u.role)
    }
}

/// Owner of the session state and the stored token.
///
/// Cheap to clone; clones share state. Writers are bootstrap, login,
/// logout and the 401 interceptor; readers take snapshots or subscribe.
/// Once the state leaves [`SessionState::Unchecked`] it never returns there.
#[derive(Debug, Clone)]
pub struct SessionStore {
    state: Arc<watch::Sender<SessionState>>,
    tokens: Arc<dyn TokenStore>,
    bootstrapped: Arc<OnceCell<()>>,
}

impl SessionStore {
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            state: Arc::new(watch::Sender::new(SessionState::Unchecked)),
            tokens,
            bootstrapped: Arc::new(OnceCell::new()),
        }
    }

    /// Current state
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every transition
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Wait until the startup check has resolved
    pub async fn resolved(&self) -> SessionState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(SessionState::auth_check_complete).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        }
    }

    /// Resolve the startup check, at most once per store.
    ///
    /// Without a stored token the state becomes `Anonymous` and `fetch` is
    /// never called. A failed fetch also resolves to `Anonymous`; there is
    /// no retry. If a login already resolved the session, nothing changes.
    pub async fn bootstrap_with<F, Fut>(&self, fetch: F) -> SessionState
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<UserInfo>>,
    {
        self.bootstrapped
            .get_or_init(|| async move {
                if self.state.borrow().auth_check_complete() {
                    return;
                }
                if self.tokens.load().is_none() {
                    tracing::debug!("No stored token, session is anonymous");
                    self.resolve(SessionState::Anonymous);
                    return;
                }
                match fetch().await {
                    Ok(user) => {
                        tracing::info!(user_id = %user.id, role = %user.role, "Session restored");
                        self.resolve(SessionState::Authenticated(user));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Identity check failed, session is anonymous");
                        self.resolve(SessionState::Anonymous);
                    }
                }
            })
            .await;
        self.snapshot()
    }

    // Unchecked -> resolved; a no-op once resolved
    fn resolve(&self, next: SessionState) {
        self.state.send_if_modified(|state| {
            if state.auth_check_complete() {
                return false;
            }
            *state = next;
            true
        });
    }

    /// Store `token` and sign `user` in
    pub fn establish(&self, token: &str, user: UserInfo) -> ClientResult<()> {
        self.tokens.save(token)?;
        tracing::info!(user_id = %user.id, role = %user.role, "Session established");
        self.state.send_replace(SessionState::Authenticated(user));
        let _ = self.bootstrapped.set(());
        Ok(())
    }

    /// Replace the signed-in user's record; ignored when anonymous
    pub fn update_user(&self, user: UserInfo) {
        self.state.send_if_modified(|state| match state {
            SessionState::Authenticated(current) => {
                *current = user;
                true
            }
            _ => false,
        });
    }

    /// Drop token and identity (explicit logout)
    pub fn clear(&self) {
        self.tokens.take();
        self.become_anonymous();
        tracing::info!("Session cleared");
    }

    /// Drop the session after the server rejected the token.
    ///
    /// Returns `true` for the one caller that actually removed a token;
    /// concurrent 401s all end anonymous but only one reports the clear.
    pub fn expire(&self) -> bool {
        let cleared = self.tokens.take().is_some();
        self.become_anonymous();
        if cleared {
            tracing::warn!("Session expired, token cleared");
        }
        cleared
    }

    fn become_anonymous(&self) {
        self.state.send_if_modified(|state| {
            if matches!(state, SessionState::Anonymous) {
                return false;
            }
            *state = SessionState::Anonymous;
            true
        });
        let _ = self.bootstrapped.set(());
    }
}

#[async_trait]
impl ResponseInterceptor for SessionStore {
    async fn on_response(&self, method: &Method, path: &str, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!(%method, path, "Unauthorized response");
            self.expire();
        }
    }
}
