use std::rc::Rc;

use shared::{SessionUser, StoredUser};

use crate::config::{
    AUTH_REDIRECT_DELAY_MS, AUTH_REQUIRED_MESSAGE, LOGIN_PATH, ROOT_PATH, STORAGE_KEY_USER_EMAIL,
    STORAGE_KEY_USER_ID, STORAGE_KEY_USER_NAME,
};
use crate::error::StorageError;
use crate::navigation::{BrowserNavigator, Navigator, ScheduledNavigation};
use crate::notification::{BrowserNotifier, Notifier, Severity};
use crate::storage::{BrowserStorage, KeyValueStore};

/// Outcome of [`SessionContext::require_auth`].
#[derive(Debug)]
#[must_use]
pub enum AuthGate {
    Granted,
    /// Access denied; the redirect to the login page goes ahead unless
    /// [`PendingRedirect::cancel`] is called.
    Denied(PendingRedirect),
}

impl AuthGate {
    pub fn is_granted(&self) -> bool {
        matches!(self, AuthGate::Granted)
    }
}

/// The login redirect scheduled by a denied [`AuthGate`]. Dropping it lets the
/// redirect fire.
#[derive(Debug)]
pub struct PendingRedirect(Option<ScheduledNavigation>);

impl PendingRedirect {
    pub fn cancel(mut self) {
        if let Some(redirect) = self.0.take() {
            redirect.cancel();
        }
    }
}

impl Drop for PendingRedirect {
    fn drop(&mut self) {
        if let Some(redirect) = self.0.take() {
            redirect.detach();
        }
    }
}

/// The locally cached identity plus the side effects tied to it. Nothing here
/// is verified with the server: the browser trusts what it stored.
#[derive(Clone)]
pub struct SessionContext {
    store: Rc<dyn KeyValueStore>,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
}

impl SessionContext {
    pub fn new(
        store: Rc<dyn KeyValueStore>,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        SessionContext {
            store,
            navigator,
            notifier,
        }
    }

    pub fn browser() -> Result<Self, StorageError> {
        Ok(Self::new(
            Rc::new(BrowserStorage::open()?),
            Rc::new(BrowserNavigator),
            Rc::new(BrowserNotifier),
        ))
    }

    /// True when a user id is stored, whatever its value, empty included.
    pub fn is_logged_in(&self) -> Result<bool, StorageError> {
        Ok(self.store.get(STORAGE_KEY_USER_ID)?.is_some())
    }

    pub fn current_user_id(&self) -> Result<Option<String>, StorageError> {
        self.store.get(STORAGE_KEY_USER_ID)
    }

    pub fn current_user(&self) -> Result<StoredUser, StorageError> {
        Ok(StoredUser {
            id: self.store.get(STORAGE_KEY_USER_ID)?,
            email: self.store.get(STORAGE_KEY_USER_EMAIL)?,
            name: self.store.get(STORAGE_KEY_USER_NAME)?,
        })
    }

    pub fn set_user(&self, user: &SessionUser) -> Result<(), StorageError> {
        self.store.set(STORAGE_KEY_USER_ID, &user.id)?;
        self.store.set(STORAGE_KEY_USER_EMAIL, &user.email)?;
        self.store.set(STORAGE_KEY_USER_NAME, &user.name)?;
        log::info!("User session stored, user_id={}", user.id);
        Ok(())
    }

    /// Clears the stored identity and sends the browser to the site root.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.store.remove(STORAGE_KEY_USER_ID)?;
        self.store.remove(STORAGE_KEY_USER_EMAIL)?;
        self.store.remove(STORAGE_KEY_USER_NAME)?;
        log::info!("User logged out");
        self.navigator.navigate(ROOT_PATH);
        Ok(())
    }

    pub fn require_auth(&self) -> Result<AuthGate, StorageError> {
        if self.is_logged_in()? {
            return Ok(AuthGate::Granted);
        }
        log::warn!("Access denied, redirecting to {LOGIN_PATH}");
        self.notifier.notify(AUTH_REQUIRED_MESSAGE, Severity::Warning);
        let redirect = self
            .navigator
            .navigate_after(LOGIN_PATH, AUTH_REDIRECT_DELAY_MS);
        Ok(AuthGate::Denied(PendingRedirect(Some(redirect))))
    }
}
