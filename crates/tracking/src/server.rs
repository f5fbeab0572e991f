use std::sync::Arc;

use actors::registry::Registry;
use model::device::Device;
use utility::id::Id;

use crate::{client::Client, config::TrackingConfig, database::Database, session::FilterSession};

/// Owns the shared pieces of the tracking service. Clients handed out by the
/// same server share the per-device filter sessions.
pub struct Server<D>
where
    D: Database,
{
    database: D,
    config: Arc<TrackingConfig>,
    sessions: Registry<Id<Device>, FilterSession>,
}

impl<D> Server<D>
where
    D: Database,
{
    pub fn new(database: D, config: TrackingConfig) -> Self {
        Self {
            database,
            sessions: Registry::bounded(config.max_sessions),
            config: Arc::new(config),
        }
    }

    pub fn client<S: Into<String>>(&self, id: S) -> Client<D> {
        Client::new(
            id,
            self.database.clone(),
            self.config.clone(),
            self.sessions.clone(),
        )
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }
}
