pub mod comment;
pub mod homestay;

use std::sync::Arc;

use innkeep_core::{ServiceConfig, StoreError};
use innkeep_kv::KVStore;
use innkeep_sql::SqliteStore;
use innkeep_store::{EntityStore, open_backends};

use crate::model::{Homestay, HomestayActivity, HomestayComment};

/// Travel service: listings, home-page activity rows, guest comments.
pub struct TravelService {
    pub homestay: EntityStore<Homestay>,
    pub homestay_activity: EntityStore<HomestayActivity>,
    pub homestay_comment: EntityStore<HomestayComment>,
}

impl TravelService {
    /// Wire the service onto shared storage, creating tables as needed.
    pub fn new(
        sql: Arc<SqliteStore>,
        cache: Option<Arc<dyn KVStore>>,
    ) -> Result<Self, StoreError> {
        let service = Self {
            homestay: EntityStore::new(sql.clone(), cache.clone()),
            homestay_activity: EntityStore::new(sql.clone(), cache.clone()),
            homestay_comment: EntityStore::new(sql, cache),
        };
        service.homestay.ensure_table()?;
        service.homestay_activity.ensure_table()?;
        service.homestay_comment.ensure_table()?;
        Ok(service)
    }

    /// Open storage from configuration and wire the service onto it.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, StoreError> {
        let (sql, cache) = open_backends(config)?;
        Self::new(sql, cache)
    }
}
