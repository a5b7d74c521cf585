pub mod config;
pub mod error;
pub mod types;

pub use config::ServiceConfig;
pub use error::StoreError;
pub use types::{ListResult, new_id, new_sn, now_rfc3339};
