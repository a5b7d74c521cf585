use innkeep_core::{StoreError, new_sn, now_rfc3339};
use innkeep_sql::Value;
use innkeep_store::DelState;

use super::PaymentService;
use crate::model::{ThirdPayment, pay_mode, pay_status, pay_status_desc};

pub struct CreatePaymentInput {
    pub user_id: i64,
    pub order_sn: String,
    pub service_type: String,
    pub pay_total: i64,
}

impl PaymentService {
    /// Open a payment flow for an order. The record carries a fresh serial
    /// number and starts in the Wait state; an order can accumulate several
    /// records when earlier attempts are abandoned.
    pub fn create_payment(&self, input: CreatePaymentInput) -> Result<ThirdPayment, StoreError> {
        let mut payment = ThirdPayment {
            id: 0,
            delete_time: None,
            del_state: DelState::NotDeleted,
            version: 0,
            sn: new_sn("PAY"),
            user_id: input.user_id,
            order_sn: input.order_sn,
            service_type: input.service_type,
            pay_mode: pay_mode::WECHAT_PAY.to_string(),
            trade_type: String::new(),
            trade_state: pay_status::WAIT,
            trade_state_desc: pay_status_desc(pay_status::WAIT).to_string(),
            pay_total: input.pay_total,
            transaction_id: String::new(),
            pay_time: None,
        };
        self.third_payment.insert(None, &mut payment)?;
        Ok(payment)
    }

    /// Payment by its serial number.
    pub fn payment_by_sn(&self, sn: &str) -> Result<ThirdPayment, StoreError> {
        let builder = self
            .third_payment
            .select_builder()
            .and_where_eq("sn", Value::Text(sn.to_string()));
        self.third_payment
            .find_all(builder, "")?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("third_payment sn {sn}")))
    }

    /// Latest payment attempt for an order, if any.
    pub fn payment_by_order_sn(&self, order_sn: &str) -> Result<Option<ThirdPayment>, StoreError> {
        let builder = self
            .third_payment
            .select_builder()
            .and_where_eq("order_sn", Value::Text(order_sn.to_string()));
        let mut latest = self.third_payment.find_page_list_by_id_desc(builder, 0, 1)?;
        Ok(latest.pop())
    }

    /// Record a gateway outcome. A repeat delivery of the state the payment
    /// is already in is accepted without touching the row; moving to Success
    /// stamps the pay time.
    pub fn update_trade_state(
        &self,
        sn: &str,
        transaction_id: &str,
        trade_state: i64,
    ) -> Result<ThirdPayment, StoreError> {
        let mut payment = self.payment_by_sn(sn)?;
        if payment.trade_state == trade_state {
            return Ok(payment);
        }

        payment.trade_state = trade_state;
        payment.trade_state_desc = pay_status_desc(trade_state).to_string();
        payment.transaction_id = transaction_id.to_string();
        if trade_state == pay_status::SUCCESS {
            payment.pay_time = Some(now_rfc3339());
        }
        self.third_payment.update_with_version(None, &mut payment)?;
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use innkeep_sql::SqliteStore;

    use super::*;
    use crate::model::service_type;

    fn test_service() -> (tempfile::TempDir, PaymentService) {
        let dir = tempfile::tempdir().unwrap();
        let sql = Arc::new(SqliteStore::open(&dir.path().join("payment.sqlite")).unwrap());
        let service = PaymentService::new(sql, None).unwrap();
        (dir, service)
    }

    fn create_input(order_sn: &str) -> CreatePaymentInput {
        CreatePaymentInput {
            user_id: 7,
            order_sn: order_sn.to_string(),
            service_type: service_type::HOMESTAY_ORDER.to_string(),
            pay_total: 30000,
        }
    }

    #[test]
    fn create_payment_starts_waiting() {
        let (_dir, service) = test_service();

        let payment = service.create_payment(create_input("ORD-1")).unwrap();
        assert!(payment.sn.starts_with("PAY"));
        assert_eq!(payment.trade_state, pay_status::WAIT);
        assert_eq!(payment.trade_state_desc, "waiting");
        assert_eq!(payment.version, 1);
        assert!(payment.pay_time.is_none());

        let found = service.payment_by_sn(&payment.sn).unwrap();
        assert_eq!(found, payment);
    }

    #[test]
    fn success_stamps_pay_time_and_transaction() {
        let (_dir, service) = test_service();
        let payment = service.create_payment(create_input("ORD-1")).unwrap();

        let paid = service
            .update_trade_state(&payment.sn, "4200001", pay_status::SUCCESS)
            .unwrap();
        assert_eq!(paid.trade_state, pay_status::SUCCESS);
        assert_eq!(paid.trade_state_desc, "paid");
        assert_eq!(paid.transaction_id, "4200001");
        assert!(paid.pay_time.is_some());
        assert_eq!(paid.version, 2);
    }

    #[test]
    fn repeat_delivery_leaves_row_untouched() {
        let (_dir, service) = test_service();
        let payment = service.create_payment(create_input("ORD-1")).unwrap();

        let first = service
            .update_trade_state(&payment.sn, "4200001", pay_status::SUCCESS)
            .unwrap();
        let second = service
            .update_trade_state(&payment.sn, "4200001", pay_status::SUCCESS)
            .unwrap();

        assert_eq!(second.version, first.version);
        assert_eq!(second.pay_time, first.pay_time);
    }

    #[test]
    fn latest_attempt_wins_for_order() {
        let (_dir, service) = test_service();
        let first = service.create_payment(create_input("ORD-1")).unwrap();
        let second = service.create_payment(create_input("ORD-1")).unwrap();
        assert_ne!(first.sn, second.sn);

        let latest = service.payment_by_order_sn("ORD-1").unwrap().unwrap();
        assert_eq!(latest.sn, second.sn);

        assert!(service.payment_by_order_sn("ORD-404").unwrap().is_none());
    }

    #[test]
    fn payment_by_sn_missing_is_not_found() {
        let (_dir, service) = test_service();
        assert!(matches!(
            service.payment_by_sn("PAY-404"),
            Err(StoreError::NotFound(_))
        ));
    }
}
