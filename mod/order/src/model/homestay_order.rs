use innkeep_core::StoreError;
use innkeep_sql::{Row, Value};
use innkeep_store::{DelState, Entity, row_i64, row_opt_str, row_str};
use serde::{Deserialize, Serialize};

/// Order lifecycle states.
pub mod trade_state {
    pub const CANCEL: i64 = -1;
    pub const WAIT_PAY: i64 = 0;
    pub const WAIT_USE: i64 = 1;
    pub const USED: i64 = 2;
    pub const REFUND: i64 = 3;
}

/// A homestay booking. Listing fields (title, cover, prices) are copied in at
/// creation so the order survives later listing edits; amounts are integer
/// minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomestayOrder {
    pub id: i64,
    pub delete_time: Option<String>,
    pub del_state: DelState,
    pub version: i64,

    /// Order serial number, unique.
    pub sn: String,
    pub user_id: i64,
    pub homestay_id: i64,
    pub title: String,
    pub cover: String,
    pub info: String,
    pub people_num: i64,
    pub live_start_date: String,
    pub live_end_date: String,
    pub live_people_num: i64,
    pub homestay_price: i64,
    pub food_price: i64,
    pub food_total_price: i64,
    pub order_total_price: i64,
    pub remark: String,
    pub trade_state: i64,
    /// Verification code shown at check-in.
    pub trade_code: String,
    pub pay_time: Option<String>,
}

const HOMESTAY_ORDER_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS homestay_order (
        id                INTEGER PRIMARY KEY AUTOINCREMENT,
        delete_time       TEXT,
        del_state         INTEGER NOT NULL DEFAULT 0,
        version           INTEGER NOT NULL DEFAULT 0,
        sn                TEXT NOT NULL,
        user_id           INTEGER NOT NULL DEFAULT 0,
        homestay_id       INTEGER NOT NULL DEFAULT 0,
        title             TEXT NOT NULL DEFAULT '',
        cover             TEXT NOT NULL DEFAULT '',
        info              TEXT NOT NULL DEFAULT '',
        people_num        INTEGER NOT NULL DEFAULT 0,
        live_start_date   TEXT NOT NULL DEFAULT '',
        live_end_date     TEXT NOT NULL DEFAULT '',
        live_people_num   INTEGER NOT NULL DEFAULT 0,
        homestay_price    INTEGER NOT NULL DEFAULT 0,
        food_price        INTEGER NOT NULL DEFAULT 0,
        food_total_price  INTEGER NOT NULL DEFAULT 0,
        order_total_price INTEGER NOT NULL DEFAULT 0,
        remark            TEXT NOT NULL DEFAULT '',
        trade_state       INTEGER NOT NULL DEFAULT 0,
        trade_code        TEXT NOT NULL DEFAULT '',
        pay_time          TEXT
    );
    CREATE UNIQUE INDEX IF NOT EXISTS idx_homestay_order_sn ON homestay_order(sn);
    CREATE INDEX IF NOT EXISTS idx_homestay_order_user ON homestay_order(user_id, trade_state);
";

impl Entity for HomestayOrder {
    fn table_name() -> &'static str {
        "homestay_order"
    }

    fn schema() -> &'static str {
        HOMESTAY_ORDER_SCHEMA
    }

    fn columns() -> &'static [&'static str] {
        &[
            "delete_time",
            "del_state",
            "version",
            "sn",
            "user_id",
            "homestay_id",
            "title",
            "cover",
            "info",
            "people_num",
            "live_start_date",
            "live_end_date",
            "live_people_num",
            "homestay_price",
            "food_price",
            "food_total_price",
            "order_total_price",
            "remark",
            "trade_state",
            "trade_code",
            "pay_time",
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
            Value::Text(self.sn.clone()),
            Value::Integer(self.user_id),
            Value::Integer(self.homestay_id),
            Value::Text(self.title.clone()),
            Value::Text(self.cover.clone()),
            Value::Text(self.info.clone()),
            Value::Integer(self.people_num),
            Value::Text(self.live_start_date.clone()),
            Value::Text(self.live_end_date.clone()),
            Value::Integer(self.live_people_num),
            Value::Integer(self.homestay_price),
            Value::Integer(self.food_price),
            Value::Integer(self.food_total_price),
            Value::Integer(self.order_total_price),
            Value::Text(self.remark.clone()),
            Value::Integer(self.trade_state),
            Value::Text(self.trade_code.clone()),
            match &self.pay_time {
                Some(at) => Value::Text(at.clone()),
                None => Value::Null,
            },
        ]
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: row_i64(row, "id")?,
            delete_time: row_opt_str(row, "delete_time"),
            del_state: DelState::from_i64(row_i64(row, "del_state")?),
            version: row_i64(row, "version")?,
            sn: row_str(row, "sn")?,
            user_id: row_i64(row, "user_id")?,
            homestay_id: row_i64(row, "homestay_id")?,
            title: row_str(row, "title")?,
            cover: row_str(row, "cover")?,
            info: row_str(row, "info")?,
            people_num: row_i64(row, "people_num")?,
            live_start_date: row_str(row, "live_start_date")?,
            live_end_date: row_str(row, "live_end_date")?,
            live_people_num: row_i64(row, "live_people_num")?,
            homestay_price: row_i64(row, "homestay_price")?,
            food_price: row_i64(row, "food_price")?,
            food_total_price: row_i64(row, "food_total_price")?,
            order_total_price: row_i64(row, "order_total_price")?,
            remark: row_str(row, "remark")?,
            trade_state: row_i64(row, "trade_state")?,
            trade_code: row_str(row, "trade_code")?,
            pay_time: row_opt_str(row, "pay_time"),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_json_roundtrip() {
        let o = HomestayOrder {
            id: 21,
            delete_time: None,
            del_state: DelState::NotDeleted,
            version: 1,
            sn: "ORD20260101123000deadbeef".into(),
            user_id: 7,
            homestay_id: 11,
            title: "lakeside loft".into(),
            cover: "a.jpg".into(),
            info: "two rooms".into(),
            people_num: 4,
            live_start_date: "2026-02-01".into(),
            live_end_date: "2026-02-03".into(),
            live_people_num: 2,
            homestay_price: 10000,
            food_price: 2000,
            food_total_price: 4000,
            order_total_price: 24000,
            remark: "late arrival".into(),
            trade_state: trade_state::WAIT_PAY,
            trade_code: "a1b2c3d4".into(),
            pay_time: None,
        };
        let json = serde_json::to_string(&o).unwrap();
        let back: HomestayOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(o, back);
    }

    #[test]
    fn order_values_align_with_columns() {
        let o = HomestayOrder {
            id: 0,
            delete_time: None,
            del_state: DelState::NotDeleted,
            version: 0,
            sn: "".into(),
            user_id: 0,
            homestay_id: 0,
            title: "".into(),
            cover: "".into(),
            info: "".into(),
            people_num: 0,
            live_start_date: "".into(),
            live_end_date: "".into(),
            live_people_num: 0,
            homestay_price: 0,
            food_price: 0,
            food_total_price: 0,
            order_total_price: 0,
            remark: "".into(),
            trade_state: 0,
            trade_code: "".into(),
            pay_time: None,
        };
        assert_eq!(HomestayOrder::columns().len(), o.values().len());
    }
}
