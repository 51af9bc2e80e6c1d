use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Something happening on a specific day of a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub title: String,
    pub occurs_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an activity. `occurs_at` must fall within the trip's
/// date range; that check happens at the boundary, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActivityInput {
    pub title: String,
    pub occurs_at: DateTime<Utc>,
}

/// One day of a trip with the activities occurring on it, ascending by
/// occurrence time. Days with no activities still get an empty bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayActivities {
    pub date: NaiveDate,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActivityResponse {
    #[serde(rename = "activityId")]
    pub activity_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitiesResponse {
    pub activities: Vec<DayActivities>,
}
