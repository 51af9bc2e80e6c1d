mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::db::Database;
use crate::invites::InviteService;
use crate::mail::Mailer;

/// Shared state for the HTTP surface.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub invites: InviteService,
}

impl AppState {
    pub fn new(db: Database, mailer: Arc<dyn Mailer>, config: Config) -> Self {
        let invites = InviteService::new(db.clone(), mailer, config);
        Self { db, invites }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Trips
        .route("/trips", post(handlers::create_trip))
        .route("/trips/{trip_id}", get(handlers::get_trip_details))
        .route("/trips/{trip_id}", put(handlers::update_trip))
        .route("/trips/{trip_id}/confirm", get(handlers::confirm_trip))
        // Invites & participants
        .route("/trips/{trip_id}/invites", post(handlers::create_invite))
        .route("/trips/{trip_id}/participants", get(handlers::list_participants))
        .route("/participants/{participant_id}", get(handlers::get_participant))
        .route(
            "/participants/{participant_id}/confirm",
            get(handlers::confirm_participant),
        )
        // Activities
        .route("/trips/{trip_id}/activities", post(handlers::create_activity))
        .route("/trips/{trip_id}/activities", get(handlers::list_activities))
        // Links
        .route("/trips/{trip_id}/links", post(handlers::create_link))
        .route("/trips/{trip_id}/links", get(handlers::list_links))
        // Health
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
