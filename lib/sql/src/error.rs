use thiserror::Error;

#[derive(Error, Debug)]
pub enum SQLError {
    #[error("query error: {0}")]
    Query(String),

    #[error("execution error: {0}")]
    Execution(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("transaction error: {0}")]
    Transaction(String),
}

impl From<SQLError> for innkeep_core::StoreError {
    fn from(e: SQLError) -> Self {
        innkeep_core::StoreError::Storage(e.to_string())
    }
}
