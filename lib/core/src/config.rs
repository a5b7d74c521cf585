use std::path::PathBuf;

/// Common CLI configuration shared by all services.
///
/// Each service binary parses these from command-line arguments, then passes
/// them to storage layer initialization.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding all service data files.
    pub data_dir: Option<PathBuf>,

    /// Path to the SQLite database file.
    /// Defaults to `{data_dir}/data.sqlite` if not specified.
    pub sqlite_path: Option<PathBuf>,

    /// Path to the redb cache file.
    /// Defaults to `{data_dir}/cache.redb` if not specified.
    pub cache_path: Option<PathBuf>,

    /// Disable the read-through cache entirely.
    pub no_cache: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            sqlite_path: None,
            cache_path: None,
            no_cache: false,
        }
    }
}

impl ServiceConfig {
    /// Parse configuration from command-line arguments.
    ///
    /// Supported flags:
    /// - `--data-dir=PATH`
    /// - `--sqlite=PATH`
    /// - `--cache=PATH`
    /// - `--no-cache`
    pub fn from_args(args: &[String]) -> Self {
        let mut config = ServiceConfig::default();

        for arg in args {
            if let Some(val) = arg.strip_prefix("--data-dir=") {
                config.data_dir = Some(PathBuf::from(val));
            } else if let Some(val) = arg.strip_prefix("--sqlite=") {
                config.sqlite_path = Some(PathBuf::from(val));
            } else if let Some(val) = arg.strip_prefix("--cache=") {
                config.cache_path = Some(PathBuf::from(val));
            } else if arg == "--no-cache" {
                config.no_cache = true;
            }
        }

        config
    }

    /// Resolve the SQLite database path, falling back to `{data_dir}/data.sqlite`.
    pub fn resolve_sqlite_path(&self) -> PathBuf {
        self.sqlite_path
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath("data.sqlite"))
    }

    /// Resolve the cache file path, falling back to `{data_dir}/cache.redb`.
    pub fn resolve_cache_path(&self) -> PathBuf {
        self.cache_path
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath("cache.redb"))
    }

    fn resolve_data_subpath(&self, name: &str) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(|d| d.join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args() {
        let args = vec![
            "--data-dir=/tmp/innkeep".to_string(),
            "--no-cache".to_string(),
        ];
        let config = ServiceConfig::from_args(&args);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/innkeep")));
        assert!(config.no_cache);
    }

    #[test]
    fn test_resolve_defaults() {
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from("/data")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_sqlite_path(),
            PathBuf::from("/data/data.sqlite")
        );
        assert_eq!(config.resolve_cache_path(), PathBuf::from("/data/cache.redb"));
    }

    #[test]
    fn test_explicit_paths_win() {
        let args = vec![
            "--data-dir=/data".to_string(),
            "--sqlite=/elsewhere/app.db".to_string(),
        ];
        let config = ServiceConfig::from_args(&args);
        assert_eq!(
            config.resolve_sqlite_path(),
            PathBuf::from("/elsewhere/app.db")
        );
        assert_eq!(config.resolve_cache_path(), PathBuf::from("/data/cache.redb"));
    }
}
