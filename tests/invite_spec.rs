//! Workflow-level specs for the invite and confirmation core, driving
//! `InviteService` directly with in-memory collaborators.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use planner::config::{Config, MailConfig};
use planner::db::Database;
use planner::error::Error;
use planner::invites::InviteService;
use planner::mail::MemoryMailer;
use planner::models::*;
use uuid::Uuid;

fn test_config() -> Config {
    Config {
        port: 0,
        api_base_url: "https://api.example.com".to_string(),
        web_base_url: "https://app.example.com".to_string(),
        database_path: None,
        mail: MailConfig {
            api_url: None,
            api_key: None,
            from_name: "Planner Team".to_string(),
            from_address: "hello@planner.app".to_string(),
        },
    }
}

fn setup_with(mailer: MemoryMailer) -> (InviteService, Database) {
    let db = Database::open_memory().expect("Failed to create in-memory database");
    db.migrate().expect("Failed to run migrations");
    let service = InviteService::new(db.clone(), Arc::new(mailer), test_config());
    (service, db)
}

fn setup() -> (InviteService, MemoryMailer, Database) {
    let mailer = MemoryMailer::new();
    let (service, db) = setup_with(mailer.clone());
    (service, mailer, db)
}

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().expect("valid timestamp")
}

fn seed_trip(db: &Database, emails_to_invite: &[&str]) -> Trip {
    db.create_trip(&CreateTripInput {
        destination: "Florianópolis".to_string(),
        starts_at: ts("2024-08-04T00:00:00Z"),
        ends_at: ts("2024-08-10T00:00:00Z"),
        owner_name: "Ada".to_string(),
        owner_email: "ada@example.com".to_string(),
        emails_to_invite: emails_to_invite.iter().map(|s| s.to_string()).collect(),
    })
    .expect("Failed to create trip")
}

#[tokio::test]
async fn create_invite_persists_an_invited_participant() {
    let (service, _mailer, db) = setup();
    let trip = seed_trip(&db, &[]);

    let participant = service
        .create_invite(
            trip.id,
            CreateInviteInput {
                email: "a@b.com".to_string(),
            },
        )
        .await
        .expect("invite failed");

    let found = db
        .get_participant(participant.id)
        .expect("Query failed")
        .expect("participant missing from store");
    assert_eq!(found.email, "a@b.com");
    assert_eq!(found.trip_id, trip.id);
    assert_eq!(found.state, ParticipantState::Invited);
}

#[tokio::test]
async fn create_invite_fails_for_unknown_trip_without_side_effects() {
    let (service, mailer, _db) = setup();

    let err = service
        .create_invite(
            Uuid::new_v4(),
            CreateInviteInput {
                email: "a@b.com".to_string(),
            },
        )
        .await
        .expect_err("should fail");

    assert!(matches!(err, Error::NotFound("Trip")));
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn create_invite_rejects_a_malformed_address_before_touching_the_store() {
    let (service, mailer, db) = setup();
    let trip = seed_trip(&db, &[]);

    let err = service
        .create_invite(
            trip.id,
            CreateInviteInput {
                email: "not-an-address".to_string(),
            },
        )
        .await
        .expect_err("should fail");

    assert!(matches!(err, Error::Validation(_)));
    assert!(mailer.sent().is_empty());
    // Only the owner row exists
    let participants = db.get_participants_by_trip(trip.id).expect("Query failed");
    assert_eq!(participants.len(), 1);
}

#[tokio::test]
async fn confirmation_link_has_the_exact_expected_shape() {
    let (service, mailer, db) = setup();
    let trip = seed_trip(&db, &[]);

    let participant = service
        .create_invite(
            trip.id,
            CreateInviteInput {
                email: "a@b.com".to_string(),
            },
        )
        .await
        .expect("invite failed");

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].html_body.contains(&format!(
        "https://api.example.com/participants/{}/confirm",
        participant.id
    )));
}

#[tokio::test]
async fn dispatch_failure_surfaces_but_keeps_the_participant() {
    let (service, db) = setup_with(MemoryMailer::failing());
    let trip = seed_trip(&db, &[]);

    let err = service
        .create_invite(
            trip.id,
            CreateInviteInput {
                email: "a@b.com".to_string(),
            },
        )
        .await
        .expect_err("should fail");

    assert!(matches!(err, Error::Dispatch(_)));

    // The row committed before the dispatch attempt and stays put.
    let participants = db.get_participants_by_trip(trip.id).expect("Query failed");
    let invited: Vec<_> = participants.iter().filter(|p| !p.is_owner).collect();
    assert_eq!(invited.len(), 1);
    assert_eq!(invited[0].email, "a@b.com");
    assert_eq!(invited[0].state, ParticipantState::Invited);
}

#[tokio::test]
async fn confirm_participant_is_idempotent() {
    let (service, mailer, db) = setup();
    let trip = seed_trip(&db, &[]);
    let participant = service
        .create_invite(
            trip.id,
            CreateInviteInput {
                email: "a@b.com".to_string(),
            },
        )
        .await
        .expect("invite failed");
    let messages_after_invite = mailer.sent().len();

    let redirect = service
        .confirm_participant(participant.id)
        .await
        .expect("confirm failed");
    assert_eq!(
        redirect,
        format!("https://app.example.com/trips/{}", trip.id)
    );

    let redirect_again = service
        .confirm_participant(participant.id)
        .await
        .expect("second confirm failed");
    assert_eq!(redirect_again, redirect);

    let found = db
        .get_participant(participant.id)
        .expect("Query failed")
        .expect("participant missing");
    assert_eq!(found.state, ParticipantState::Confirmed);
    assert_eq!(mailer.sent().len(), messages_after_invite);
}

#[tokio::test]
async fn confirm_participant_fails_for_unknown_id() {
    let (service, _mailer, _db) = setup();

    let err = service
        .confirm_participant(Uuid::new_v4())
        .await
        .expect_err("should fail");

    assert!(matches!(err, Error::NotFound("Participant")));
}

#[tokio::test]
async fn confirm_trip_invites_pending_participants_exactly_once() {
    let (service, mailer, db) = setup();
    let trip = seed_trip(&db, &["bob@example.com", "carol@example.com"]);

    let redirect = service.confirm_trip(trip.id).await.expect("confirm failed");
    assert_eq!(
        redirect,
        format!("https://app.example.com/trips/{}", trip.id)
    );

    let sent = mailer.sent();
    let recipients: Vec<&str> = sent.iter().map(|m| m.to.as_str()).collect();
    assert_eq!(recipients, vec!["bob@example.com", "carol@example.com"]);
    assert!(sent[0].html_body.contains("Florianópolis"));

    // Re-confirming sends nothing new
    service
        .confirm_trip(trip.id)
        .await
        .expect("second confirm failed");
    assert_eq!(mailer.sent().len(), 2);

    let found = db.get_trip(trip.id).expect("Query failed").expect("missing trip");
    assert!(found.is_confirmed);
}

#[tokio::test]
async fn create_trip_validates_dates() {
    let (service, mailer, _db) = setup();

    let err = service
        .create_trip(CreateTripInput {
            destination: "Lisbon".to_string(),
            starts_at: ts("2020-01-01T00:00:00Z"),
            ends_at: ts("2020-01-05T00:00:00Z"),
            owner_name: "Ada".to_string(),
            owner_email: "ada@example.com".to_string(),
            emails_to_invite: vec![],
        })
        .await
        .expect_err("should fail");
    assert!(matches!(err, Error::Validation(_)));

    let starts_at = Utc::now() + Duration::days(30);
    let err = service
        .create_trip(CreateTripInput {
            destination: "Lisbon".to_string(),
            starts_at,
            ends_at: starts_at - Duration::days(1),
            owner_name: "Ada".to_string(),
            owner_email: "ada@example.com".to_string(),
            emails_to_invite: vec![],
        })
        .await
        .expect_err("should fail");
    assert!(matches!(err, Error::Validation(_)));

    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn create_trip_emails_the_owner_a_confirmation_link() {
    let (service, mailer, _db) = setup();

    let starts_at = Utc::now() + Duration::days(30);
    let trip = service
        .create_trip(CreateTripInput {
            destination: "Lisbon".to_string(),
            starts_at,
            ends_at: starts_at + Duration::days(4),
            owner_name: "Ada".to_string(),
            owner_email: "ada@example.com".to_string(),
            emails_to_invite: vec!["bob@example.com".to_string()],
        })
        .await
        .expect("create failed");

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada@example.com");
    assert!(sent[0].html_body.contains("Hello Ada,"));
    assert!(sent[0]
        .html_body
        .contains(&format!("https://api.example.com/trips/{}/confirm", trip.id)));
}
