use innkeep_core::StoreError;
use innkeep_sql::{Row, Value};
use innkeep_store::{DelState, Entity, row_i64, row_opt_str, row_str};
use serde::{Deserialize, Serialize};

/// Homestay listing. Prices are integer minor currency units per night;
/// `banner` holds comma-separated image URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Homestay {
    pub id: i64,
    pub delete_time: Option<String>,
    pub del_state: DelState,
    pub version: i64,

    pub title: String,
    pub sub_title: String,
    pub banner: String,
    pub info: String,
    /// Sleeping capacity.
    pub people_num: i64,
    pub homestay_business_id: i64,
    /// Landlord account.
    pub user_id: i64,
    pub row_state: i64,
    pub row_type: i64,
    pub food_info: String,
    pub food_price: i64,
    pub homestay_price: i64,
    pub market_homestay_price: i64,
}

const HOMESTAY_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS homestay (
        id                    INTEGER PRIMARY KEY AUTOINCREMENT,
        delete_time           TEXT,
        del_state             INTEGER NOT NULL DEFAULT 0,
        version               INTEGER NOT NULL DEFAULT 0,
        title                 TEXT NOT NULL DEFAULT '',
        sub_title             TEXT NOT NULL DEFAULT '',
        banner                TEXT NOT NULL DEFAULT '',
        info                  TEXT NOT NULL DEFAULT '',
        people_num            INTEGER NOT NULL DEFAULT 0,
        homestay_business_id  INTEGER NOT NULL DEFAULT 0,
        user_id               INTEGER NOT NULL DEFAULT 0,
        row_state             INTEGER NOT NULL DEFAULT 0,
        row_type              INTEGER NOT NULL DEFAULT 0,
        food_info             TEXT NOT NULL DEFAULT '',
        food_price            INTEGER NOT NULL DEFAULT 0,
        homestay_price        INTEGER NOT NULL DEFAULT 0,
        market_homestay_price INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_homestay_business ON homestay(homestay_business_id);
    CREATE INDEX IF NOT EXISTS idx_homestay_user ON homestay(user_id);
";

impl Entity for Homestay {
    fn table_name() -> &'static str {
        "homestay"
    }

    fn schema() -> &'static str {
        HOMESTAY_SCHEMA
    }

    fn columns() -> &'static [&'static str] {
        &[
            "delete_time",
            "del_state",
            "version",
            "title",
            "sub_title",
            "banner",
            "info",
            "people_num",
            "homestay_business_id",
            "user_id",
            "row_state",
            "row_type",
            "food_info",
            "food_price",
            "homestay_price",
            "market_homestay_price",
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![
            match &self.delete_time {
                Some(at) => Value::Text(at.clone()),
                None => Value::Null,
            },
            Value::Integer(self.del_state.as_i64()),
            Value::Integer(self.version),
            Value::Text(self.title.clone()),
            Value::Text(self.sub_title.clone()),
            Value::Text(self.banner.clone()),
            Value::Text(self.info.clone()),
            Value::Integer(self.people_num),
            Value::Integer(self.homestay_business_id),
            Value::Integer(self.user_id),
            Value::Integer(self.row_state),
            Value::Integer(self.row_type),
            Value::Text(self.food_info.clone()),
            Value::Integer(self.food_price),
            Value::Integer(self.homestay_price),
            Value::Integer(self.market_homestay_price),
        ]
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: row_i64(row, "id")?,
            delete_time: row_opt_str(row, "delete_time"),
            del_state: DelState::from_i64(row_i64(row, "del_state")?),
            version: row_i64(row, "version")?,
            title: row_str(row, "title")?,
            sub_title: row_str(row, "sub_title")?,
            banner: row_str(row, "banner")?,
            info: row_str(row, "info")?,
            people_num: row_i64(row, "people_num")?,
            homestay_business_id: row_i64(row, "homestay_business_id")?,
            user_id: row_i64(row, "user_id")?,
            row_state: row_i64(row, "row_state")?,
            row_type: row_i64(row, "row_type")?,
            food_info: row_str(row, "food_info")?,
            food_price: row_i64(row, "food_price")?,
            homestay_price: row_i64(row, "homestay_price")?,
            market_homestay_price: row_i64(row, "market_homestay_price")?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn version(&self) -> i64 {
        self.version
    }
    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
    fn del_state(&self) -> DelState {
        self.del_state
    }
    fn set_del_state(&mut self, state: DelState) {
        self.del_state = state;
    }
    fn set_delete_time(&mut self, at: String) {
        self.delete_time = Some(at);
    }
}
