//! Signed-in session and its persistence.
//!
//! The session is an explicit value: the login command writes it, the UI
//! persists it, and [`ApiClient`](crate::api::ApiClient) receives it when it
//! is built. Nothing else reads tokens from storage.

use std::any::Any;
use std::collections::BTreeMap;

use console_states::{State, snapshot_clone};

use crate::{ApiError, ApiResult};

pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Key/value storage that survives restarts (`eframe::Storage` in the app).
pub trait SessionStore {
    fn get_string(&self, key: &str) -> Option<String>;

    fn set_string(&mut self, key: &str, value: String);

    fn remove(&mut self, key: &str);
}

/// In-memory store, used in tests and when persistence is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    refresh_token: Option<String>,
    remember: bool,
    /// Bumped on every sign-in/sign-out so the UI knows when to persist.
    generation: u64,
}

impl Session {
    /// Restore a session from storage. Empty values count as absent.
    pub fn load(store: &impl SessionStore) -> Self {
        let token = store.get_string(TOKEN_KEY).filter(|t| !t.is_empty());
        let refresh_token = store
            .get_string(REFRESH_TOKEN_KEY)
            .filter(|t| !t.is_empty());
        let remember = token.is_some();

        Self {
            token,
            refresh_token,
            remember,
            generation: 0,
        }
    }

    pub fn sign_in(&mut self, token: String, refresh_token: Option<String>, remember: bool) {
        self.token = Some(token);
        self.refresh_token = refresh_token;
        self.remember = remember;
        self.generation += 1;
    }

    pub fn sign_out(&mut self) {
        self.token = None;
        self.refresh_token = None;
        self.remember = false;
        self.generation += 1;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn remember(&self) -> bool {
        self.remember
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The bearer credential for an authenticated call.
    pub fn bearer(&self) -> ApiResult<&str> {
        self.token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::AuthMissing)
    }

    /// Write the tokens to `store`, or clear them when the session is not
    /// remembered.
    pub fn persist(&self, store: &mut impl SessionStore) {
        match (&self.token, self.remember) {
            (Some(token), true) => {
                store.set_string(TOKEN_KEY, token.clone());
                match &self.refresh_token {
                    Some(refresh) => store.set_string(REFRESH_TOKEN_KEY, refresh.clone()),
                    None => store.remove(REFRESH_TOKEN_KEY),
                }
            }
            _ => {
                store.remove(TOKEN_KEY);
                store.remove(REFRESH_TOKEN_KEY);
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("remember", &self.remember)
            .field("generation", &self.generation)
            .finish()
    }
}

impl State for Session {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        snapshot_clone(self)
    }
}
