use super::UserId;
use crate::macros::setter;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::Request;

// Common

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub steps: u64,
    #[serde(default)]
    pub calories_out: Option<u64>,
    #[serde(default)]
    pub activity_calories: Option<u64>,
    #[serde(default)]
    pub floors: Option<u64>,
    #[serde(default)]
    pub sedentary_minutes: Option<u64>,
    #[serde(default)]
    pub lightly_active_minutes: Option<u64>,
    #[serde(default)]
    pub fairly_active_minutes: Option<u64>,
    #[serde(default)]
    pub very_active_minutes: Option<u64>,
    #[serde(default)]
    pub distances: Vec<ActivityDistance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDistance {
    pub activity: String,
    pub distance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityGoals {
    #[serde(default)]
    pub steps: Option<u64>,
    #[serde(default)]
    pub calories_out: Option<u64>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub floors: Option<u64>,
    #[serde(default)]
    pub active_minutes: Option<u64>,
}

// Requests

/// `GET /1/user/{user-id}/activities/date/{date}.json`
#[derive(Debug, Clone, Serialize)]
pub struct GetDailyActivitySummary {
    user_id: UserId,
    date: NaiveDate,
}

impl GetDailyActivitySummary {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            user_id: UserId::default(),
            date,
        }
    }

    setter!(user_id: UserId);
    setter!(date: NaiveDate);
}

impl Request for GetDailyActivitySummary {
    type Data = ();
    type Response = DailyActivitySummaryResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!(
            "/1/user/{}/activities/date/{}.json",
            self.user_id,
            self.date.format("%Y-%m-%d")
        )
        .into()
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyActivitySummaryResponse {
    pub summary: ActivitySummary,
    #[serde(default)]
    pub goals: Option<ActivityGoals>,
}
