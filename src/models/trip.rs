use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Activity;

/// A planned journey.
///
/// Trips are created unconfirmed together with their owner participant and
/// any initial invitees. The owner receives a confirmation email; following
/// its link marks the trip confirmed and fans out invite emails to everyone
/// still pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

/// A trip with its activities, ordered ascending by occurrence time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripWithActivities {
    #[serde(flatten)]
    pub trip: Trip,
    pub activities: Vec<Activity>,
}

/// Input for creating a new trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTripInput {
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub owner_name: String,
    pub owner_email: String,
    /// Email addresses invited alongside the owner at creation time.
    #[serde(default)]
    pub emails_to_invite: Vec<String>,
}

/// Input for updating a trip. All fields are optional for partial updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTripInput {
    pub destination: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// Returned by trip creation and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripIdResponse {
    #[serde(rename = "tripId")]
    pub trip_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDetailsResponse {
    pub trip: Trip,
}
