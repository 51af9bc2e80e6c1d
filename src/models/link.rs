use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reference URL attached to a trip (bookings, documents, maps).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLinkInput {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLinkResponse {
    #[serde(rename = "linkId")]
    pub link_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksResponse {
    pub links: Vec<Link>,
}
