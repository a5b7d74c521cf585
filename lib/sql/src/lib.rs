pub mod error;
pub mod sqlite;
pub mod traits;

pub use error::SQLError;
pub use sqlite::{SqlSession, SqliteStore};
pub use traits::{Row, SQLExecutor, Value};
