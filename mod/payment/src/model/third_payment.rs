use innkeep_core::StoreError;
use innkeep_sql::{Row, Value};
use innkeep_store::{DelState, Entity, row_i64, row_opt_str, row_str};
use serde::{Deserialize, Serialize};

/// Payment lifecycle states.
pub mod pay_status {
    pub const WAIT: i64 = 0;
    pub const SUCCESS: i64 = 1;
    pub const REFUND: i64 = 2;
    pub const CLOSED: i64 = 3;
}

/// What a payment settles.
pub mod service_type {
    pub const HOMESTAY_ORDER: &str = "homestayOrder";
}

/// Payment channel.
pub mod pay_mode {
    pub const WECHAT_PAY: &str = "wechatPay";
}

/// Human-readable label for a payment state.
pub fn pay_status_desc(state: i64) -> &'static str {
    match state {
        pay_status::WAIT => "waiting",
        pay_status::SUCCESS => "paid",
        pay_status::REFUND => "refunded",
        pay_status::CLOSED => "closed",
        _ => "",
    }
}

/// One payment flow against an external gateway. `sn` is the payment's own
/// serial number; `order_sn` links back to the order being settled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirdPayment {
    pub id: i64,
    pub delete_time: Option<String>,
    pub del_state: DelState,
    pub version: i64,

    pub sn: String,
    pub user_id: i64,
    pub order_sn: String,
    pub service_type: String,
    pub pay_mode: String,
    /// Gateway transaction type, filled by the gateway integration.
    pub trade_type: String,
    pub trade_state: i64,
    pub trade_state_desc: String,
    /// Amount in minor currency units.
    pub pay_total: i64,
    /// Gateway-side transaction id, known once the gateway responds.
    pub transaction_id: String,
    pub pay_time: Option<String>,
}

const THIRD_PAYMENT_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS third_payment (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        delete_time      TEXT,
        del_state        INTEGER NOT NULL DEFAULT 0,
        version          INTEGER NOT NULL DEFAULT 0,
        sn               TEXT NOT NULL,
        user_id          INTEGER NOT NULL DEFAULT 0,
        order_sn         TEXT NOT NULL DEFAULT '',
        service_type     TEXT NOT NULL DEFAULT '',
        pay_mode         TEXT NOT NULL DEFAULT '',
        trade_type       TEXT NOT NULL DEFAULT '',
        trade_state      INTEGER NOT NULL DEFAULT 0,
        trade_state_desc TEXT NOT NULL DEFAULT '',
        pay_total        INTEGER NOT NULL DEFAULT 0,
        transaction_id   TEXT NOT NULL DEFAULT '',
        pay_time         TEXT
    );
    CREATE UNIQUE INDEX IF NOT EXISTS idx_third_payment_sn ON third_payment(sn);
    CREATE INDEX IF NOT EXISTS idx_third_payment_order_sn ON third_payment(order_sn);
";

impl Entity for ThirdPayment {
    fn table_name() -> &'static str {
        "third_payment"
    }

    fn schema() -> &'static str {
        THIRD_PAYMENT_SCHEMA
    }

    fn columns() -> &'static [&'static str] {
        &[
            "delete_time",
            "del_state",
            "version",
            "sn",
            "user_id",
            "order_sn",
            "service_type",
            "pay_mode",
            "trade_type",
            "trade_state",
            "trade_state_desc",
            "pay_total",
            "transaction_id",
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
            Value::Text(self.order_sn.clone()),
            Value::Text(self.service_type.clone()),
            Value::Text(self.pay_mode.clone()),
            Value::Text(self.trade_type.clone()),
            Value::Integer(self.trade_state),
            Value::Text(self.trade_state_desc.clone()),
            Value::Integer(self.pay_total),
            Value::Text(self.transaction_id.clone()),
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
            order_sn: row_str(row, "order_sn")?,
            service_type: row_str(row, "service_type")?,
            pay_mode: row_str(row, "pay_mode")?,
            trade_type: row_str(row, "trade_type")?,
            trade_state: row_i64(row, "trade_state")?,
            trade_state_desc: row_str(row, "trade_state_desc")?,
            pay_total: row_i64(row, "pay_total")?,
            transaction_id: row_str(row, "transaction_id")?,
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
