use innkeep_core::{ListResult, StoreError, new_id, new_sn, now_rfc3339};
use innkeep_payment::model::pay_status;
use innkeep_sql::Value;
use innkeep_store::DelState;

use super::OrderService;
use crate::model::{HomestayOrder, trade_state};

/// Booking request. Listing fields arrive denormalized; the caller layer is
/// responsible for fetching them from the travel service.
pub struct CreateOrderInput {
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
}

impl OrderService {
    /// Place a booking: assigns a serial number and a check-in code, starting
    /// in the WaitPay state.
    pub fn create_order(&self, input: CreateOrderInput) -> Result<HomestayOrder, StoreError> {
        let entropy = new_id();
        let mut order = HomestayOrder {
            id: 0,
            delete_time: None,
            del_state: DelState::NotDeleted,
            version: 0,
            sn: new_sn("ORD"),
            user_id: input.user_id,
            homestay_id: input.homestay_id,
            title: input.title,
            cover: input.cover,
            info: input.info,
            people_num: input.people_num,
            live_start_date: input.live_start_date,
            live_end_date: input.live_end_date,
            live_people_num: input.live_people_num,
            homestay_price: input.homestay_price,
            food_price: input.food_price,
            food_total_price: input.food_total_price,
            order_total_price: input.order_total_price,
            remark: input.remark,
            trade_state: trade_state::WAIT_PAY,
            trade_code: entropy[..8].to_string(),
            pay_time: None,
        };
        self.homestay_order.insert(None, &mut order)?;
        Ok(order)
    }

    /// Order by its serial number.
    pub fn order_by_sn(&self, sn: &str) -> Result<HomestayOrder, StoreError> {
        let builder = self
            .homestay_order
            .select_builder()
            .and_where_eq("sn", Value::Text(sn.to_string()));
        self.homestay_order
            .find_all(builder, "")?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("homestay_order sn {sn}")))
    }

    /// One user's orders, newest first, optionally narrowed to a trade
    /// state, with the full match count.
    pub fn user_order_page(
        &self,
        user_id: i64,
        state: Option<i64>,
        page: i64,
        page_size: i64,
    ) -> Result<ListResult<HomestayOrder>, StoreError> {
        let mut builder = self
            .homestay_order
            .select_builder()
            .and_where_eq("user_id", Value::Integer(user_id));
        if let Some(state) = state {
            builder = builder.and_where_eq("trade_state", Value::Integer(state));
        }
        let (items, total) = self
            .homestay_order
            .find_page_list_by_page_with_total(builder, page, page_size, "")?;
        Ok(ListResult { items, total })
    }

    /// Move an order to a target trade state. An order already at the target
    /// is returned untouched, so replayed transitions are harmless. Reaching
    /// WaitUse (paid) stamps the pay time.
    pub fn update_trade_state_by_sn(
        &self,
        sn: &str,
        target: i64,
    ) -> Result<HomestayOrder, StoreError> {
        let mut order = self.order_by_sn(sn)?;
        if order.trade_state == target {
            return Ok(order);
        }

        order.trade_state = target;
        if target == trade_state::WAIT_USE {
            order.pay_time = Some(now_rfc3339());
        }
        self.homestay_order.update_with_version(None, &mut order)?;
        Ok(order)
    }

    /// Apply a payment outcome delivered from the payment side (at least
    /// once). States with no order-side meaning are ignored.
    pub fn apply_payment_result(
        &self,
        order_sn: &str,
        pay_state: i64,
    ) -> Result<Option<HomestayOrder>, StoreError> {
        match order_trade_state_for_payment(pay_state) {
            Some(target) => Ok(Some(self.update_trade_state_by_sn(order_sn, target)?)),
            None => Ok(None),
        }
    }
}

/// Order state a payment outcome maps to; `None` means the outcome carries
/// no order-side transition.
pub fn order_trade_state_for_payment(pay_state: i64) -> Option<i64> {
    match pay_state {
        pay_status::SUCCESS => Some(trade_state::WAIT_USE),
        pay_status::REFUND => Some(trade_state::REFUND),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use innkeep_sql::SqliteStore;

    use super::*;

    fn test_service() -> (tempfile::TempDir, OrderService) {
        let dir = tempfile::tempdir().unwrap();
        let sql = Arc::new(SqliteStore::open(&dir.path().join("order.sqlite")).unwrap());
        let service = OrderService::new(sql, None).unwrap();
        (dir, service)
    }

    fn create_input(user_id: i64) -> CreateOrderInput {
        CreateOrderInput {
            user_id,
            homestay_id: 11,
            title: "lakeside loft".to_string(),
            cover: "a.jpg".to_string(),
            info: "two rooms".to_string(),
            people_num: 4,
            live_start_date: "2026-02-01".to_string(),
            live_end_date: "2026-02-03".to_string(),
            live_people_num: 2,
            homestay_price: 10000,
            food_price: 2000,
            food_total_price: 4000,
            order_total_price: 24000,
            remark: String::new(),
        }
    }

    #[test]
    fn create_order_starts_waiting_for_payment() {
        let (_dir, service) = test_service();

        let order = service.create_order(create_input(7)).unwrap();
        assert!(order.sn.starts_with("ORD"));
        assert_eq!(order.trade_code.len(), 8);
        assert_eq!(order.trade_state, trade_state::WAIT_PAY);
        assert_eq!(order.version, 1);
        assert!(order.pay_time.is_none());

        let found = service.order_by_sn(&order.sn).unwrap();
        assert_eq!(found, order);
    }

    #[test]
    fn order_by_sn_missing_is_not_found() {
        let (_dir, service) = test_service();
        assert!(matches!(
            service.order_by_sn("ORD-404"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn user_page_filters_by_user_and_state() {
        let (_dir, service) = test_service();
        let first = service.create_order(create_input(1)).unwrap();
        service.create_order(create_input(1)).unwrap();
        service.create_order(create_input(1)).unwrap();
        service.create_order(create_input(2)).unwrap();

        service
            .update_trade_state_by_sn(&first.sn, trade_state::WAIT_USE)
            .unwrap();

        let all = service.user_order_page(1, None, 1, 10).unwrap();
        assert_eq!(all.total, 3);

        let unpaid = service
            .user_order_page(1, Some(trade_state::WAIT_PAY), 1, 10)
            .unwrap();
        assert_eq!(unpaid.total, 2);

        let other = service.user_order_page(2, None, 1, 10).unwrap();
        assert_eq!(other.total, 1);
    }

    #[test]
    fn paid_transition_stamps_pay_time_once() {
        let (_dir, service) = test_service();
        let order = service.create_order(create_input(7)).unwrap();

        let paid = service
            .update_trade_state_by_sn(&order.sn, trade_state::WAIT_USE)
            .unwrap();
        assert_eq!(paid.trade_state, trade_state::WAIT_USE);
        assert!(paid.pay_time.is_some());
        assert_eq!(paid.version, 2);

        let replay = service
            .update_trade_state_by_sn(&order.sn, trade_state::WAIT_USE)
            .unwrap();
        assert_eq!(replay.version, 2);
        assert_eq!(replay.pay_time, paid.pay_time);
    }

    #[test]
    fn payment_outcome_mapping() {
        assert_eq!(
            order_trade_state_for_payment(pay_status::SUCCESS),
            Some(trade_state::WAIT_USE)
        );
        assert_eq!(
            order_trade_state_for_payment(pay_status::REFUND),
            Some(trade_state::REFUND)
        );
        assert_eq!(order_trade_state_for_payment(pay_status::WAIT), None);
        assert_eq!(order_trade_state_for_payment(pay_status::CLOSED), None);
        assert_eq!(order_trade_state_for_payment(99), None);
    }

    #[test]
    fn unmapped_payment_outcome_is_a_no_op() {
        let (_dir, service) = test_service();
        let order = service.create_order(create_input(7)).unwrap();

        let result = service
            .apply_payment_result(&order.sn, pay_status::WAIT)
            .unwrap();
        assert!(result.is_none());

        let untouched = service.order_by_sn(&order.sn).unwrap();
        assert_eq!(untouched.trade_state, trade_state::WAIT_PAY);
        assert_eq!(untouched.version, 1);
    }

    #[test]
    fn redelivered_payment_success_is_stable() {
        let (_dir, service) = test_service();
        let order = service.create_order(create_input(7)).unwrap();

        let first = service
            .apply_payment_result(&order.sn, pay_status::SUCCESS)
            .unwrap()
            .unwrap();
        let second = service
            .apply_payment_result(&order.sn, pay_status::SUCCESS)
            .unwrap()
            .unwrap();

        assert_eq!(first.trade_state, trade_state::WAIT_USE);
        assert_eq!(second.version, first.version);
    }
}
