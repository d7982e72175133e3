//! Session persistence through `eframe::Storage` (app data directory on
//! native, `localStorage` on the web).

use console_business::{MemoryStore, REFRESH_TOKEN_KEY, Session, SessionStore, TOKEN_KEY};

/// Adapts an `eframe::Storage` to the business [`SessionStore`].
pub struct EframeStore<'a> {
    storage: &'a mut dyn eframe::Storage,
}

impl<'a> EframeStore<'a> {
    pub fn new(storage: &'a mut dyn eframe::Storage) -> Self {
        Self { storage }
    }
}

impl SessionStore for EframeStore<'_> {
    fn get_string(&self, key: &str) -> Option<String> {
        self.storage.get_string(key)
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.storage.set_string(key, value);
    }

    // `eframe::Storage` has no delete; an empty value reads back as absent.
    fn remove(&mut self, key: &str) {
        self.storage.set_string(key, String::new());
    }
}

/// Restore the persisted session, if any.
pub fn load_session(storage: Option<&dyn eframe::Storage>) -> Session {
    let Some(storage) = storage else {
        return Session::default();
    };

    let mut store = MemoryStore::new();
    for key in [TOKEN_KEY, REFRESH_TOKEN_KEY] {
        if let Some(value) = storage.get_string(key) {
            store.set_string(key, value);
        }
    }
    Session::load(&store)
}

/// Write `session` to `storage` and flush it.
pub fn save_session(session: &Session, storage: &mut dyn eframe::Storage) {
    session.persist(&mut EframeStore::new(storage));
    storage.flush();
}
