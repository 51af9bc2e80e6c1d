//! Domain models for the trip planner.
//!
//! # Core Concepts
//!
//! - [`Trip`]: a planned journey with a destination and a date range. Created
//!   unconfirmed; the owner confirms it via an emailed link.
//! - [`Participant`]: a person attached to a trip, identified by email.
//!   Starts out `invited` and flips to `confirmed` through the confirmation
//!   link. The trip creator's own row carries the owner flag and starts
//!   confirmed.
//! - [`Activity`]: something happening on a specific day of the trip.
//! - [`Link`]: a reference URL attached to a trip (bookings, documents).
//!
//! Request and response shapes for the HTTP surface live next to the entity
//! they belong to.

mod activity;
mod link;
mod participant;
mod trip;

pub use activity::*;
pub use link::*;
pub use participant::*;
pub use trip::*;
