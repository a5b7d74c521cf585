use std::fs;
use std::sync::Arc;

use innkeep_core::{ServiceConfig, StoreError};
use innkeep_kv::{KVStore, RedbStore};
use innkeep_sql::SqliteStore;
use tracing::info;

/// Open the storage backends a service context runs on: SQLite under the
/// data directory, plus a redb cache unless caching is disabled.
pub fn open_backends(
    config: &ServiceConfig,
) -> Result<(Arc<SqliteStore>, Option<Arc<dyn KVStore>>), StoreError> {
    if let Some(dir) = &config.data_dir {
        fs::create_dir_all(dir)
            .map_err(|e| StoreError::Storage(format!("create data dir: {e}")))?;
    }

    let sqlite_path = config.resolve_sqlite_path();
    let sql = SqliteStore::open(&sqlite_path)
        .map_err(|e| StoreError::Storage(format!("open sqlite: {e}")))?;
    info!("sqlite database at {}", sqlite_path.display());

    let cache: Option<Arc<dyn KVStore>> = if config.no_cache {
        info!("row cache disabled");
        None
    } else {
        let cache_path = config.resolve_cache_path();
        let cache = RedbStore::open(&cache_path)
            .map_err(|e| StoreError::Storage(format!("open cache: {e}")))?;
        info!("row cache at {}", cache_path.display());
        Some(Arc::new(cache))
    };

    Ok((Arc::new(sql), cache))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn opens_both_backends_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig {
            data_dir: Some(dir.path().join("nested")),
            sqlite_path: None,
            cache_path: None,
            no_cache: false,
        };

        let (_sql, cache) = open_backends(&config).unwrap();
        assert!(cache.is_some());
        assert!(dir.path().join("nested").join("data.sqlite").exists());
        assert!(dir.path().join("nested").join("cache.redb").exists());
    }

    #[test]
    fn no_cache_flag_disables_cache() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from(dir.path())),
            sqlite_path: None,
            cache_path: None,
            no_cache: true,
        };

        let (_sql, cache) = open_backends(&config).unwrap();
        assert!(cache.is_none());
    }
}
