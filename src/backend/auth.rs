//! Identity lookup.
//!
//! Account management lives in an external identity provider; the client only
//! needs the current user's id and a way to hear about session changes.

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
}

#[async_trait]
pub trait Identity: Send + Sync {
    /// The signed-in user, if any.
    async fn current_user(&self) -> Option<User>;
}

/// Identity fixed at launch (config/CLI supplies the child profile id).
/// The sign-in flow itself belongs to the excluded account layers.
pub struct StaticIdentity {
    user: Option<User>,
}

impl StaticIdentity {
    pub fn new(child_id: Option<String>) -> Self {
        Self {
            user: child_id.map(|id| User { id }),
        }
    }
}

#[async_trait]
impl Identity for StaticIdentity {
    async fn current_user(&self) -> Option<User> {
        self.user.clone()
    }
}

type AuthCallback = Box<dyn Fn(Option<&User>) + Send>;

/// Fan-out for auth-state changes: collaborators register callbacks, the
/// session owner reports sign-in/sign-out, everyone hears about it.
#[derive(Default)]
pub struct AuthWatcher {
    current: Option<User>,
    subscribers: Vec<AuthCallback>,
}

impl AuthWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Register a callback fired on every subsequent session change.
    pub fn on_auth_state_change<F: Fn(Option<&User>) + Send + 'static>(&mut self, callback: F) {
        self.subscribers.push(Box::new(callback));
    }

    /// Record a new session state and notify every subscriber.
    pub fn set_session(&mut self, user: Option<User>) {
        self.current = user;
        for subscriber in &self.subscribers {
            subscriber(self.current.as_ref());
        }
    }
}
