use serde::Serialize;

/// Result wrapper for list operations that carry a filtered total.
#[derive(Debug, Clone, Serialize)]
pub struct ListResult<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
}

/// Generate a new random ID (UUIDv4, no dashes).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string().replace('-', "")
}

/// Generate a business serial number: prefix + UTC timestamp + random tail.
///
/// Serial numbers identify orders and payments externally; they are distinct
/// from the storage-assigned surrogate `id`.
pub fn new_sn(prefix: &str) -> String {
    let ts = chrono::Utc::now().format("%Y%m%d%H%M%S");
    let entropy = new_id();
    format!("{}{}{}", prefix, ts, &entropy[..8])
}

/// Get the current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
