//! Subject and body composition for notification emails.
//!
//! Plain `format!` composition; the frontend owns real templating.

use crate::config::MailConfig;
use crate::dates::format_long_date;
use crate::mail::EmailMessage;
use crate::models::Trip;

/// Invite email sent to a participant, carrying their confirmation link.
pub(crate) fn invite(
    mail: &MailConfig,
    trip: &Trip,
    to: &str,
    confirmation_link: &str,
) -> EmailMessage {
    let starts_on = format_long_date(trip.starts_at);
    let ends_on = format_long_date(trip.ends_at);

    EmailMessage {
        from_name: mail.from_name.clone(),
        from_address: mail.from_address.clone(),
        to: to.to_string(),
        subject: format!(
            "Confirm your spot on the trip to {} on {}",
            trip.destination, starts_on
        ),
        html_body: format!(
            r#"<div style="font-family: sans-serif; font-size: 16px; line-height: 1.6;">
  <p>You have been invited to a trip to <strong>{}</strong> from <strong>{}</strong> to <strong>{}</strong>.</p>
  <p></p>
  <p>To confirm your spot on the trip, click the link below:</p>
  <p></p>
  <p><a href="{}">Confirm my spot</a></p>
  <p></p>
  <p>If you don't know what this email is about, just ignore it.</p>
</div>"#,
            trip.destination, starts_on, ends_on, confirmation_link
        ),
    }
}

/// Confirmation email sent to the trip owner right after creation.
pub(crate) fn trip_confirmation(
    mail: &MailConfig,
    trip: &Trip,
    owner_name: &str,
    to: &str,
    confirmation_link: &str,
) -> EmailMessage {
    let starts_on = format_long_date(trip.starts_at);
    let ends_on = format_long_date(trip.ends_at);

    EmailMessage {
        from_name: mail.from_name.clone(),
        from_address: mail.from_address.clone(),
        to: to.to_string(),
        subject: format!(
            "Confirm your trip to {} on {}",
            trip.destination, starts_on
        ),
        html_body: format!(
            r#"<div style="font-family: sans-serif; font-size: 16px; line-height: 1.6;">
  <p>Hello {},</p>
  <p></p>
  <p>You requested a trip to <strong>{}</strong> from <strong>{}</strong> to <strong>{}</strong>.</p>
  <p></p>
  <p>To confirm your trip, click the link below:</p>
  <p></p>
  <p><a href="{}">Confirm trip</a></p>
  <p></p>
  <p>If you don't know what this email is about, just ignore it.</p>
</div>"#,
            owner_name, trip.destination, starts_on, ends_on, confirmation_link
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn mail_config() -> MailConfig {
        MailConfig {
            api_url: None,
            api_key: None,
            from_name: "Planner Team".to_string(),
            from_address: "hello@planner.app".to_string(),
        }
    }

    fn trip() -> Trip {
        Trip {
            id: Uuid::new_v4(),
            destination: "Florianópolis".to_string(),
            starts_at: "2024-08-04T00:00:00Z".parse().unwrap(),
            ends_at: "2024-08-10T00:00:00Z".parse().unwrap(),
            is_confirmed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn invite_embeds_destination_dates_and_link() {
        let message = invite(
            &mail_config(),
            &trip(),
            "a@b.com",
            "https://api.example.com/participants/p1/confirm",
        );

        assert_eq!(message.to, "a@b.com");
        assert_eq!(message.from_address, "hello@planner.app");
        assert_eq!(
            message.subject,
            "Confirm your spot on the trip to Florianópolis on August 4, 2024"
        );
        assert!(message.html_body.contains("Florianópolis"));
        assert!(message.html_body.contains("August 4, 2024"));
        assert!(message.html_body.contains("August 10, 2024"));
        assert!(message
            .html_body
            .contains(r#"href="https://api.example.com/participants/p1/confirm""#));
    }

    #[test]
    fn trip_confirmation_greets_the_owner() {
        let message = trip_confirmation(
            &mail_config(),
            &trip(),
            "Ada",
            "ada@example.com",
            "https://api.example.com/trips/t1/confirm",
        );

        assert_eq!(message.to, "ada@example.com");
        assert!(message.html_body.contains("Hello Ada,"));
        assert!(message
            .html_body
            .contains(r#"href="https://api.example.com/trips/t1/confirm""#));
    }
}
