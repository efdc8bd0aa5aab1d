pub mod api;
pub mod server;

use std::sync::Mutex;

use crate::config::settings::Config;
use crate::data::records::RecordStore;
use crate::history::SessionHistory;

/// Shared state for the dashboard: the read-only store, the config, and the
/// session's query history. The store never changes after load, so handlers
/// read it without locking; only the history needs a mutex.
pub struct AppState {
    pub store: RecordStore,
    pub config: Config,
    pub history: Mutex<SessionHistory>,
}

impl AppState {
    pub fn new(store: RecordStore, config: Config) -> Self {
        Self {
            store,
            config,
            history: Mutex::new(SessionHistory::new()),
        }
    }
}
