use innkeep_core::{ListResult, StoreError};
use innkeep_sql::Value;

use super::TravelService;
use crate::model::{Homestay, row_status};

impl TravelService {
    /// Listing detail by id.
    pub fn homestay_detail(&self, id: i64) -> Result<Homestay, StoreError> {
        self.homestay.find_one(id)
    }

    /// One business's live listings, newest first, with the full match count.
    pub fn business_homestay_page(
        &self,
        homestay_business_id: i64,
        page: i64,
        page_size: i64,
    ) -> Result<ListResult<Homestay>, StoreError> {
        let builder = self
            .homestay
            .select_builder()
            .and_where_eq("homestay_business_id", Value::Integer(homestay_business_id));
        let (items, total) = self
            .homestay
            .find_page_list_by_page_with_total(builder, page, page_size, "")?;
        Ok(ListResult { items, total })
    }

    /// Sum of nightly prices across a business's live listings.
    pub fn business_price_sum(&self, homestay_business_id: i64) -> Result<f64, StoreError> {
        let builder = self
            .homestay
            .select_builder()
            .and_where_eq("homestay_business_id", Value::Integer(homestay_business_id));
        self.homestay.find_sum(builder, "homestay_price")
    }

    /// Listing ids published under one activity section, newest row first.
    pub fn activity_data_ids(&self, activity_row_type: &str) -> Result<Vec<i64>, StoreError> {
        let builder = self
            .homestay_activity
            .select_builder()
            .and_where_eq("row_type", Value::Text(activity_row_type.to_string()))
            .and_where_eq("row_status", Value::Text(row_status::UP.to_string()));
        let rows = self.homestay_activity.find_all(builder, "")?;
        Ok(rows.iter().map(|a| a.data_id).collect())
    }
}
