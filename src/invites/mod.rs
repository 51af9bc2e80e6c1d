//! The invite and confirmation workflows.
//!
//! [`InviteService`] orchestrates trip lookup, participant creation,
//! confirmation-link construction and email dispatch. Its collaborators
//! (store, mail transport, link configuration) are passed in explicitly so
//! tests can substitute in-memory doubles.

mod email;

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::mail::Mailer;
use crate::models::*;

#[derive(Clone)]
pub struct InviteService {
    db: Database,
    mailer: Arc<dyn Mailer>,
    config: Config,
}

impl InviteService {
    pub fn new(db: Database, mailer: Arc<dyn Mailer>, config: Config) -> Self {
        Self { db, mailer, config }
    }

    /// Create a trip with its owner and initial invitees, then email the
    /// owner a trip-confirmation link.
    pub async fn create_trip(&self, input: CreateTripInput) -> Result<Trip> {
        if input.starts_at < Utc::now() {
            return Err(Error::Validation("Invalid trip start date.".to_string()));
        }
        if input.ends_at < input.starts_at {
            return Err(Error::Validation("Invalid trip end date.".to_string()));
        }
        let owner_email = EmailAddress::parse(&input.owner_email)
            .ok_or_else(|| Error::Validation("Invalid owner email address.".to_string()))?;
        for address in &input.emails_to_invite {
            EmailAddress::parse(address)
                .ok_or_else(|| Error::Validation("Invalid email address.".to_string()))?;
        }

        let trip = self.db.create_trip(&input)?;

        let link = self.trip_confirmation_link(trip.id);
        let message = email::trip_confirmation(
            &self.config.mail,
            &trip,
            &input.owner_name,
            owner_email.as_str(),
            &link,
        );
        let receipt = self.mailer.send(&message).await?;
        tracing::debug!(
            trip = %trip.id,
            message_id = %receipt.message_id,
            "trip confirmation email dispatched"
        );

        Ok(trip)
    }

    /// Register a participant invited to a trip and deliver their
    /// confirmation email.
    ///
    /// The participant row commits before dispatch; a transport failure
    /// surfaces as [`Error::Dispatch`] and does not roll it back.
    pub async fn create_invite(
        &self,
        trip_id: Uuid,
        input: CreateInviteInput,
    ) -> Result<Participant> {
        let address = EmailAddress::parse(&input.email)
            .ok_or_else(|| Error::Validation("Invalid email address.".to_string()))?;

        let TripWithActivities { trip, .. } = self
            .db
            .get_trip_with_activities(trip_id)?
            .ok_or(Error::NotFound("Trip"))?;

        let participant = self
            .db
            .create_participant(trip.id, NewParticipant::invited(address.as_str()))?;

        let link = self.participant_confirmation_link(participant.id);
        let message = email::invite(&self.config.mail, &trip, &participant.email, &link);
        let receipt = self.mailer.send(&message).await?;
        tracing::debug!(
            participant = %participant.id,
            message_id = %receipt.message_id,
            "invite email dispatched"
        );

        Ok(participant)
    }

    /// Mark a trip confirmed and fan invite emails out to every still-invited
    /// non-owner participant. Idempotent: a confirmed trip redirects without
    /// re-sending anything.
    ///
    /// Returns the frontend URL the caller should redirect to.
    pub async fn confirm_trip(&self, trip_id: Uuid) -> Result<String> {
        let trip = self.db.get_trip(trip_id)?.ok_or(Error::NotFound("Trip"))?;
        let redirect = format!("{}/trips/{}", self.config.web_base_url, trip.id);

        if trip.is_confirmed {
            return Ok(redirect);
        }

        self.db.confirm_trip(trip.id)?;

        for participant in self.db.get_pending_participants(trip.id)? {
            let link = self.participant_confirmation_link(participant.id);
            let message = email::invite(&self.config.mail, &trip, &participant.email, &link);
            let receipt = self.mailer.send(&message).await?;
            tracing::debug!(
                participant = %participant.id,
                message_id = %receipt.message_id,
                "invite email dispatched"
            );
        }

        Ok(redirect)
    }

    /// Mark a participant confirmed. Idempotent: re-confirming is a silent
    /// no-op with no notification.
    ///
    /// Returns the frontend URL the caller should redirect to.
    pub async fn confirm_participant(&self, participant_id: Uuid) -> Result<String> {
        let participant = self
            .db
            .get_participant(participant_id)?
            .ok_or(Error::NotFound("Participant"))?;
        let redirect = format!("{}/trips/{}", self.config.web_base_url, participant.trip_id);

        if participant.state == ParticipantState::Confirmed {
            return Ok(redirect);
        }

        self.db.confirm_participant(participant.id)?;

        Ok(redirect)
    }

    fn participant_confirmation_link(&self, participant_id: Uuid) -> String {
        format!(
            "{}/participants/{}/confirm",
            self.config.api_base_url, participant_id
        )
    }

    fn trip_confirmation_link(&self, trip_id: Uuid) -> String {
        format!("{}/trips/{}/confirm", self.config.api_base_url, trip_id)
    }
}
