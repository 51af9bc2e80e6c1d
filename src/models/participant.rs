use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person attached to a trip, identified by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub state: ParticipantState,
    pub is_owner: bool,
    pub created_at: DateTime<Utc>,
}

/// Confirmation state of a participant.
///
/// - `Invited`: created by an invite, confirmation email pending or unanswered
/// - `Confirmed`: followed the confirmation link (the owner starts here)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantState {
    Invited,
    Confirmed,
}

impl ParticipantState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invited => "invited",
            Self::Confirmed => "confirmed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "invited" => Some(Self::Invited),
            "confirmed" => Some(Self::Confirmed),
            _ => None,
        }
    }
}

/// Input for attaching a participant row to a trip.
#[derive(Debug, Clone)]
pub struct NewParticipant {
    pub name: Option<String>,
    pub email: String,
    pub state: ParticipantState,
    pub is_owner: bool,
}

impl NewParticipant {
    /// A plain invitee: no name yet, pending confirmation.
    pub fn invited(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
            state: ParticipantState::Invited,
            is_owner: false,
        }
    }
}

/// A syntactically valid email address.
///
/// This is the boundary check that runs before any invite workflow sees the
/// value. It is deliberately structural (exactly one `@`, non-empty local
/// part, dotted domain, no whitespace), not an RFC 5322 validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(s: &str) -> Option<Self> {
        let (local, domain) = s.split_once('@')?;
        if local.is_empty() || domain.is_empty() {
            return None;
        }
        if domain.contains('@') || s.contains(char::is_whitespace) {
            return None;
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return None;
        }
        Some(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /trips/{trip_id}/invites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInviteInput {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInviteResponse {
    #[serde(rename = "participantId")]
    pub participant_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantResponse {
    pub participant: Participant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantsResponse {
    pub participants: Vec<Participant>,
}
