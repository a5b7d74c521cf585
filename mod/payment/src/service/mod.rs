pub mod payment;

use std::sync::Arc;

use innkeep_core::{ServiceConfig, StoreError};
use innkeep_kv::KVStore;
use innkeep_sql::SqliteStore;
use innkeep_store::{EntityStore, open_backends};

use crate::model::ThirdPayment;

/// Payment service: gateway-facing payment records.
pub struct PaymentService {
    pub third_payment: EntityStore<ThirdPayment>,
}

impl PaymentService {
    /// Wire the service onto shared storage, creating tables as needed.
    pub fn new(
        sql: Arc<SqliteStore>,
        cache: Option<Arc<dyn KVStore>>,
    ) -> Result<Self, StoreError> {
        let service = Self {
            third_payment: EntityStore::new(sql, cache),
        };
        service.third_payment.ensure_table()?;
        Ok(service)
    }

    /// Open storage from configuration and wire the service onto it.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, StoreError> {
        let (sql, cache) = open_backends(config)?;
        Self::new(sql, cache)
    }
}
