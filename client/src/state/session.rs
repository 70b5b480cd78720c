//! Session store: the authentication lifecycle for the whole application.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionStore` is created in `App`, wrapped in an `RwSignal`, and handed
//! down through context. It is the only writer of the persisted credential and
//! of the shared `AuthHeader`, and it changes both in the same call that changes
//! its own credential field, so no request can go out with a stale header.
//!
//! DESIGN
//! ======
//! Profile fetches are split into `begin_*` (returns a `RefreshTicket`) and
//! `complete_refresh` (applies a result only if its ticket is still current).
//! Every logout and every new fetch bumps the epoch, so a late response from
//! before a logout is discarded instead of resurrecting the cleared user.
//!
//! The wire side follows the same epoch: `ProfileFetch` holds the abort handle
//! of the one outstanding `/auth/me` request and aborts it as soon as the
//! session moves to a newer epoch.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, Mutex, PoisonError};

use leptos::prelude::*;

use crate::net::abort::{AbortHandle, InFlight};
use crate::net::api::{ApiClient, AuthHeader};
use crate::net::error::ApiError;
use crate::net::types::{ApprovalState, User};

/// Durable client-side home of the bearer credential.
pub trait CredentialStorage: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, credential: &str);
    fn clear(&self);
}

/// `localStorage`-backed storage under `CREDENTIAL_STORAGE_KEY`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl CredentialStorage for BrowserStorage {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
            storage
                .get_item(crate::config::CREDENTIAL_STORAGE_KEY)
                .ok()
                .flatten()
                .filter(|v| !v.is_empty())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn save(&self, credential: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
                let _ = storage.set_item(crate::config::CREDENTIAL_STORAGE_KEY, credential);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credential;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
                let _ = storage.remove_item(crate::config::CREDENTIAL_STORAGE_KEY);
            }
        }
    }
}

/// In-process storage, used during SSR and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage(Arc<Mutex<Option<String>>>);

impl MemoryStorage {
    pub fn with_credential(credential: &str) -> Self {
        Self(Arc::new(Mutex::new(Some(credential.to_owned()))))
    }

    pub fn peek(&self) -> Option<String> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl CredentialStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.peek()
    }

    fn save(&self, credential: &str) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(credential.to_owned());
    }

    fn clear(&self) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Proof that a profile fetch was started against a particular session epoch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshTicket {
    epoch: u64,
    credential: String,
}

impl RefreshTicket {
    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Abort slot for the outstanding profile fetch, tagged with the epoch it was
/// issued under. Lives beside the session signal because browser abort
/// controllers are not `Send`.
#[derive(Debug, Default)]
pub struct ProfileFetch {
    epoch: u64,
    in_flight: InFlight,
}

impl ProfileFetch {
    /// Abort the previous fetch and hand out the handle for `ticket`'s request.
    pub fn start(&mut self, ticket: &RefreshTicket) -> Rc<AbortHandle> {
        self.epoch = ticket.epoch;
        self.in_flight.replace()
    }

    /// Abort the outstanding fetch once the session has moved past its epoch.
    pub fn sync(&mut self, epoch: u64) {
        if epoch != self.epoch {
            self.in_flight.cancel();
        }
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_idle()
    }
}

/// Shared handle to the app-wide `ProfileFetch`.
pub type ProfileSlot = StoredValue<ProfileFetch, LocalStorage>;

/// What `complete_refresh` did with a fetch result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The profile replaced the stored user.
    Applied,
    /// The fetch failed and the session was cleared.
    LoggedOut,
    /// The session moved on (logout or newer fetch); the result was dropped.
    Stale,
}

pub struct SessionStore {
    user: Option<User>,
    credential: Option<String>,
    loading: bool,
    epoch: u64,
    auth: AuthHeader,
    storage: Arc<dyn CredentialStorage>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", &self.user)
            .field("has_credential", &self.credential.is_some())
            .field("loading", &self.loading)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// A store that has not yet looked at persisted state; `loading` is true
    /// until `restore` runs.
    pub fn new(auth: AuthHeader, storage: Arc<dyn CredentialStorage>) -> Self {
        Self { user: None, credential: None, loading: true, epoch: 0, auth, storage }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Bumped by every logout and every new profile fetch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// A profile has been resolved for the credential currently installed.
    /// Says nothing about approval.
    pub fn is_identified(&self) -> bool {
        self.user.is_some() && self.credential.is_some()
    }

    /// A user counts as authenticated for content access only once resolved
    /// and approved.
    pub fn is_authenticated(&self) -> bool {
        self.is_identified() && self.user.as_ref().is_some_and(|u| u.approval == ApprovalState::Approved)
    }

    /// Process-start initialization. Returns the ticket for the profile fetch
    /// when a persisted credential exists; otherwise settles as logged out.
    pub fn restore(&mut self) -> Option<RefreshTicket> {
        match self.storage.load() {
            Some(credential) => {
                self.install_credential(Some(&credential));
                self.loading = true;
                Some(self.next_ticket(credential))
            }
            None => {
                self.loading = false;
                None
            }
        }
    }

    /// Persist `credential`, install it, and start the profile fetch.
    pub fn begin_login(&mut self, credential: &str) -> RefreshTicket {
        self.storage.save(credential);
        self.user = None;
        self.install_credential(Some(credential));
        self.loading = true;
        self.next_ticket(credential.to_owned())
    }

    /// Start a profile re-fetch with the stored credential. Without one the
    /// store settles as logged out and no fetch is needed.
    pub fn begin_refresh(&mut self) -> Option<RefreshTicket> {
        let Some(credential) = self.credential.clone() else {
            self.loading = false;
            return None;
        };
        Some(self.next_ticket(credential))
    }

    /// Apply a profile fetch result if `ticket` is still current. An aborted
    /// fetch is treated as stale, never as a failed login.
    pub fn complete_refresh(&mut self, ticket: &RefreshTicket, result: Result<User, ApiError>) -> RefreshOutcome {
        if ticket.epoch != self.epoch || matches!(result, Err(ApiError::Cancelled)) {
            return RefreshOutcome::Stale;
        }
        match result {
            Ok(user) => {
                self.user = Some(user);
                self.loading = false;
                RefreshOutcome::Applied
            }
            Err(err) => {
                leptos::logging::warn!("profile refresh failed, clearing session: {err}");
                self.logout();
                RefreshOutcome::LoggedOut
            }
        }
    }

    /// Clear user, credential, persisted storage, and the default header.
    pub fn logout(&mut self) {
        self.user = None;
        self.install_credential(None);
        self.storage.clear();
        self.loading = false;
        self.epoch += 1;
    }

    /// Translate an API failure into its user message, forcing a logout when
    /// the backend reports the credential invalid.
    pub fn absorb_error(&mut self, err: &ApiError) -> String {
        if matches!(err, ApiError::Unauthorized) {
            self.logout();
        }
        err.user_message()
    }

    fn install_credential(&mut self, credential: Option<&str>) {
        self.credential = credential.map(str::to_owned);
        self.auth.set_credential(credential);
    }

    fn next_ticket(&mut self, credential: String) -> RefreshTicket {
        self.epoch += 1;
        RefreshTicket { epoch: self.epoch, credential }
    }
}

/// Run the profile fetch for `ticket` and apply its result to `session`.
pub async fn drive_refresh(
    session: RwSignal<SessionStore>,
    profile: ProfileSlot,
    api: &ApiClient,
    ticket: RefreshTicket,
) -> RefreshOutcome {
    let handle = profile.try_update_value(|p| p.start(&ticket));
    let result = api.current_user(ticket.credential(), handle.as_deref()).await;
    session
        .try_update(|s| s.complete_refresh(&ticket, result))
        .unwrap_or(RefreshOutcome::Stale)
}

/// Store `credential` and resolve once its profile fetch completes.
pub async fn login(
    session: RwSignal<SessionStore>,
    profile: ProfileSlot,
    api: &ApiClient,
    credential: &str,
) -> RefreshOutcome {
    let Some(ticket) = session.try_update(|s| s.begin_login(credential)) else {
        return RefreshOutcome::Stale;
    };
    drive_refresh(session, profile, api, ticket).await
}

/// Re-fetch the current profile with the stored credential.
pub async fn refresh_user(session: RwSignal<SessionStore>, profile: ProfileSlot, api: &ApiClient) -> RefreshOutcome {
    match session.try_update(SessionStore::begin_refresh).flatten() {
        Some(ticket) => drive_refresh(session, profile, api, ticket).await,
        None => RefreshOutcome::LoggedOut,
    }
}

/// Load any persisted credential and verify it in the background.
pub fn restore_session(session: RwSignal<SessionStore>, profile: ProfileSlot, api: ApiClient) {
    let Some(ticket) = session.try_update(SessionStore::restore).flatten() else {
        return;
    };
    leptos::logging::log!("restoring persisted session");
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        drive_refresh(session, profile, &api, ticket).await;
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (profile, api, ticket);
    }
}

/// Abort the outstanding profile fetch whenever the session leaves its epoch,
/// whichever path (sign out, forced logout, newer fetch) moved it.
pub fn track_profile_fetch(session: RwSignal<SessionStore>, profile: ProfileSlot) {
    Effect::new(move || {
        let epoch = session.with(SessionStore::epoch);
        profile.try_update_value(|p| p.sync(epoch));
    });
}

/// `SessionStore::absorb_error` through the shared signal, falling back to the
/// plain message once the session has been disposed.
pub fn absorb_failure(session: RwSignal<SessionStore>, err: &ApiError) -> String {
    session.try_update(|s| s.absorb_error(err)).unwrap_or_else(|| err.user_message())
}
