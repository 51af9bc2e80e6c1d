use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::api::AppState;
use crate::error::Error;
use crate::models::*;

// ============================================================
// Error Handling
// ============================================================

/// Map a workflow error onto an HTTP status and client-visible message.
///
/// Validation and not-found messages are safe to expose as-is. Dispatch
/// and internal faults are logged server-side with the full cause; clients
/// only see a generic message.
fn error_response(e: Error) -> (StatusCode, String) {
    match e {
        Error::Validation(_) => {
            tracing::warn!("Validation error: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        Error::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        Error::Dispatch(ref cause) => {
            tracing::error!("Mail dispatch failed: {}", cause);
            (
                StatusCode::BAD_GATEWAY,
                "Failed to deliver notification email".to_string(),
            )
        }
        Error::Internal(ref cause) => {
            tracing::error!("Internal error: {:#}", cause);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error_response(Error::Internal(e))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Trips
// ============================================================

pub async fn create_trip(
    State(state): State<AppState>,
    Json(input): Json<CreateTripInput>,
) -> Result<Json<TripIdResponse>, (StatusCode, String)> {
    state
        .invites
        .create_trip(input)
        .await
        .map(|trip| Json(TripIdResponse { trip_id: trip.id }))
        .map_err(error_response)
}

pub async fn get_trip_details(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<TripDetailsResponse>, (StatusCode, String)> {
    state
        .db
        .get_trip(trip_id)
        .map_err(internal)?
        .map(|trip| Json(TripDetailsResponse { trip }))
        .ok_or_else(|| error_response(Error::NotFound("Trip")))
}

pub async fn update_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
    Json(input): Json<UpdateTripInput>,
) -> Result<Json<TripIdResponse>, (StatusCode, String)> {
    // Date checks apply to the merged values, but only when the request
    // actually touches the dates; a destination-only update of an ongoing
    // trip must keep working.
    if input.starts_at.is_some() || input.ends_at.is_some() {
        let existing = state
            .db
            .get_trip(trip_id)
            .map_err(internal)?
            .ok_or_else(|| error_response(Error::NotFound("Trip")))?;

        let starts_at = input.starts_at.unwrap_or(existing.starts_at);
        let ends_at = input.ends_at.unwrap_or(existing.ends_at);
        if starts_at < Utc::now() {
            return Err(error_response(Error::Validation(
                "Invalid trip start date.".to_string(),
            )));
        }
        if ends_at < starts_at {
            return Err(error_response(Error::Validation(
                "Invalid trip end date.".to_string(),
            )));
        }
    }

    state
        .db
        .update_trip(trip_id, input)
        .map_err(internal)?
        .map(|trip| Json(TripIdResponse { trip_id: trip.id }))
        .ok_or_else(|| error_response(Error::NotFound("Trip")))
}

pub async fn confirm_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Redirect, (StatusCode, String)> {
    state
        .invites
        .confirm_trip(trip_id)
        .await
        .map(|url| Redirect::to(&url))
        .map_err(error_response)
}

// ============================================================
// Invites & Participants
// ============================================================

pub async fn create_invite(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
    Json(input): Json<CreateInviteInput>,
) -> Result<Json<CreateInviteResponse>, (StatusCode, String)> {
    state
        .invites
        .create_invite(trip_id, input)
        .await
        .map(|participant| {
            Json(CreateInviteResponse {
                participant_id: participant.id,
            })
        })
        .map_err(error_response)
}

pub async fn list_participants(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<ParticipantsResponse>, (StatusCode, String)> {
    state
        .db
        .get_trip(trip_id)
        .map_err(internal)?
        .ok_or_else(|| error_response(Error::NotFound("Trip")))?;

    state
        .db
        .get_participants_by_trip(trip_id)
        .map(|participants| Json(ParticipantsResponse { participants }))
        .map_err(internal)
}

pub async fn get_participant(
    State(state): State<AppState>,
    Path(participant_id): Path<Uuid>,
) -> Result<Json<ParticipantResponse>, (StatusCode, String)> {
    state
        .db
        .get_participant(participant_id)
        .map_err(internal)?
        .map(|participant| Json(ParticipantResponse { participant }))
        .ok_or_else(|| error_response(Error::NotFound("Participant")))
}

pub async fn confirm_participant(
    State(state): State<AppState>,
    Path(participant_id): Path<Uuid>,
) -> Result<Redirect, (StatusCode, String)> {
    state
        .invites
        .confirm_participant(participant_id)
        .await
        .map(|url| Redirect::to(&url))
        .map_err(error_response)
}

// ============================================================
// Activities
// ============================================================

pub async fn create_activity(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
    Json(input): Json<CreateActivityInput>,
) -> Result<Json<CreateActivityResponse>, (StatusCode, String)> {
    let trip = state
        .db
        .get_trip(trip_id)
        .map_err(internal)?
        .ok_or_else(|| error_response(Error::NotFound("Trip")))?;

    if input.occurs_at < trip.starts_at || input.occurs_at > trip.ends_at {
        return Err(error_response(Error::Validation(
            "Invalid activity date.".to_string(),
        )));
    }

    state
        .db
        .create_activity(trip_id, input)
        .map(|activity| {
            Json(CreateActivityResponse {
                activity_id: activity.id,
            })
        })
        .map_err(internal)
}

pub async fn list_activities(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<ActivitiesResponse>, (StatusCode, String)> {
    state
        .db
        .get_trip_day_activities(trip_id)
        .map_err(internal)?
        .map(|activities| Json(ActivitiesResponse { activities }))
        .ok_or_else(|| error_response(Error::NotFound("Trip")))
}

// ============================================================
// Links
// ============================================================

pub async fn create_link(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
    Json(input): Json<CreateLinkInput>,
) -> Result<Json<CreateLinkResponse>, (StatusCode, String)> {
    state
        .db
        .get_trip(trip_id)
        .map_err(internal)?
        .ok_or_else(|| error_response(Error::NotFound("Trip")))?;

    state
        .db
        .create_link(trip_id, input)
        .map(|link| Json(CreateLinkResponse { link_id: link.id }))
        .map_err(internal)
}

pub async fn list_links(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<LinksResponse>, (StatusCode, String)> {
    state
        .db
        .get_trip(trip_id)
        .map_err(internal)?
        .ok_or_else(|| error_response(Error::NotFound("Trip")))?;

    state
        .db
        .get_links_by_trip(trip_id)
        .map(|links| Json(LinksResponse { links }))
        .map_err(internal)
}
