use crate::endpoints::{UserId, activities::GetDailyActivitySummary};
use chrono::NaiveDate;

#[derive(Default)]
pub struct ActivityRepository {
    user_id: UserId,
}

impl ActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn daily_summary(&self, date: NaiveDate) -> GetDailyActivitySummary {
        GetDailyActivitySummary::new(date).user_id(self.user_id.clone())
    }
}
