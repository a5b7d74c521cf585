pub mod order;

use std::sync::Arc;

use innkeep_core::{ServiceConfig, StoreError};
use innkeep_kv::KVStore;
use innkeep_sql::SqliteStore;
use innkeep_store::{EntityStore, open_backends};

use crate::model::HomestayOrder;

/// Order service: bookings and their trade-state transitions.
pub struct OrderService {
    pub homestay_order: EntityStore<HomestayOrder>,
}

impl OrderService {
    /// Wire the service onto shared storage, creating tables as needed.
    pub fn new(
        sql: Arc<SqliteStore>,
        cache: Option<Arc<dyn KVStore>>,
    ) -> Result<Self, StoreError> {
        let service = Self {
            homestay_order: EntityStore::new(sql, cache),
        };
        service.homestay_order.ensure_table()?;
        Ok(service)
    }

    /// Open storage from configuration and wire the service onto it.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, StoreError> {
        let (sql, cache) = open_backends(config)?;
        Self::new(sql, cache)
    }
}
