use std::sync::Mutex;

use discovery_core::User;
use discovery_logging::discovery_info;
use tokio::sync::broadcast;

const SESSION_CHANNEL_CAPACITY: usize = 16;

/// Source of the logged-in identity and its change notifications.
pub trait SessionProvider: Send + Sync {
    fn current(&self) -> Option<User>;

    /// Notifications for every login or logout after this call.
    fn subscribe(&self) -> broadcast::Receiver<Option<User>>;
}

/// In-process session holder; every `refresh`/`logout` is a transition.
pub struct CurrentUser {
    user: Mutex<Option<User>>,
    tx: broadcast::Sender<Option<User>>,
}

impl CurrentUser {
    pub fn new(user: Option<User>) -> Self {
        let (tx, _) = broadcast::channel(SESSION_CHANNEL_CAPACITY);
        Self {
            user: Mutex::new(user),
            tx,
        }
    }

    pub fn refresh(&self, user: User) {
        discovery_info!("session refreshed user_id={}", user.id);
        self.replace(Some(user));
    }

    pub fn logout(&self) {
        discovery_info!("session logged out");
        self.replace(None);
    }

    fn replace(&self, user: Option<User>) {
        if let Ok(mut guard) = self.user.lock() {
            *guard = user.clone();
        }
        // No subscribers is fine; nobody is watching yet.
        let _ = self.tx.send(user);
    }
}

impl Default for CurrentUser {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SessionProvider for CurrentUser {
    fn current(&self) -> Option<User> {
        self.user.lock().ok().and_then(|guard| guard.clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<Option<User>> {
        self.tx.subscribe()
    }
}
