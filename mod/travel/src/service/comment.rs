use innkeep_core::StoreError;
use innkeep_sql::Value;

use super::TravelService;
use crate::model::HomestayComment;

impl TravelService {
    /// Comment feed for a listing: one descending cursor page per call.
    /// `last_id == 0` fetches the newest page; pass the last id of the
    /// previous page to continue.
    pub fn comment_page(
        &self,
        homestay_id: i64,
        last_id: i64,
        page_size: i64,
    ) -> Result<Vec<HomestayComment>, StoreError> {
        let builder = self
            .homestay_comment
            .select_builder()
            .and_where_eq("homestay_id", Value::Integer(homestay_id));
        self.homestay_comment
            .find_page_list_by_id_desc(builder, last_id, page_size)
    }

    /// Mean of every comment's combined star score for a listing. A listing
    /// with no comments scores 0.
    pub fn homestay_star(&self, homestay_id: i64) -> Result<f64, StoreError> {
        let builder = self
            .homestay_comment
            .select_builder()
            .and_where_eq("homestay_id", Value::Integer(homestay_id));
        let comments = self.homestay_comment.find_all(builder, "")?;
        if comments.is_empty() {
            return Ok(0.0);
        }
        let sum: f64 = comments.iter().map(|c| average_star(&c.star)).sum();
        Ok(sum / comments.len() as f64)
    }
}

/// Average of a comma-separated sub-score string like `"4.5,5.0,4.0"`.
/// Blank or unparsable parts are skipped; no usable parts scores 0.
pub fn average_star(star: &str) -> f64 {
    let mut sum = 0.0;
    let mut count = 0u32;
    for part in star.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Ok(value) = part.parse::<f64>() {
            sum += value;
            count += 1;
        }
    }
    if count == 0 { 0.0 } else { sum / f64::from(count) }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use innkeep_sql::SqliteStore;
    use innkeep_store::DelState;

    use super::*;

    fn test_service() -> (tempfile::TempDir, TravelService) {
        let dir = tempfile::tempdir().unwrap();
        let sql = Arc::new(SqliteStore::open(&dir.path().join("travel.sqlite")).unwrap());
        let service = TravelService::new(sql, None).unwrap();
        (dir, service)
    }

    fn comment(homestay_id: i64, star: &str) -> HomestayComment {
        HomestayComment {
            id: 0,
            delete_time: None,
            del_state: DelState::NotDeleted,
            version: 0,
            homestay_id,
            user_id: 1,
            content: "nice place".to_string(),
            star: star.to_string(),
        }
    }

    #[test]
    fn star_averaging_handles_ragged_input() {
        assert_eq!(average_star("4.5,5.0,4.0"), 4.5);
        assert_eq!(average_star("3"), 3.0);
        assert_eq!(average_star(""), 0.0);
        assert_eq!(average_star(",,,"), 0.0);
        assert_eq!(average_star("bad,5.0"), 5.0);
        assert_eq!(average_star(" 4 , 5 "), 4.5);
    }

    #[test]
    fn comment_feed_walks_every_comment_once() {
        let (_dir, service) = test_service();
        for _ in 0..7 {
            service
                .homestay_comment
                .insert(None, &mut comment(1, "5.0"))
                .unwrap();
        }
        for _ in 0..2 {
            service
                .homestay_comment
                .insert(None, &mut comment(2, "1.0"))
                .unwrap();
        }

        let mut seen = Vec::new();
        let mut last_id = 0;
        loop {
            let page = service.comment_page(1, last_id, 3).unwrap();
            if page.is_empty() {
                break;
            }
            last_id = page.last().map(|c| c.id).unwrap_or(0);
            seen.extend(page.into_iter().map(|c| c.id));
        }

        assert_eq!(seen.len(), 7);
        let mut sorted = seen.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(seen, sorted, "feed must arrive in descending id order");
    }

    #[test]
    fn homestay_star_averages_across_comments() {
        let (_dir, service) = test_service();
        service
            .homestay_comment
            .insert(None, &mut comment(1, "5.0,5.0"))
            .unwrap();
        service
            .homestay_comment
            .insert(None, &mut comment(1, "4.0"))
            .unwrap();

        assert_eq!(service.homestay_star(1).unwrap(), 4.5);
        assert_eq!(service.homestay_star(404).unwrap(), 0.0);
    }
}
