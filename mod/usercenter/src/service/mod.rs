pub mod user;

use std::sync::Arc;

use innkeep_core::{ServiceConfig, StoreError};
use innkeep_kv::KVStore;
use innkeep_sql::SqliteStore;
use innkeep_store::{EntityStore, open_backends};

use crate::model::{User, UserAuth};

/// User-center service: accounts and their auth bindings.
pub struct UsercenterService {
    pub user: EntityStore<User>,
    pub user_auth: EntityStore<UserAuth>,
}

impl UsercenterService {
    /// Wire the service onto shared storage, creating tables as needed.
    pub fn new(
        sql: Arc<SqliteStore>,
        cache: Option<Arc<dyn KVStore>>,
    ) -> Result<Self, StoreError> {
        let service = Self {
            user: EntityStore::new(sql.clone(), cache.clone()),
            user_auth: EntityStore::new(sql, cache),
        };
        service.user.ensure_table()?;
        service.user_auth.ensure_table()?;
        Ok(service)
    }

    /// Open storage from configuration and wire the service onto it.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, StoreError> {
        let (sql, cache) = open_backends(config)?;
        Self::new(sql, cache)
    }
}
