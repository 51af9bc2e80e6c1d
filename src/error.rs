use thiserror::Error;

use crate::mail::MailError;

/// Errors surfaced by the request workflows.
///
/// Every handler funnels these through a single mapping to an HTTP status
/// and message; see `api::handlers::error_response`.
#[derive(Debug, Error)]
pub enum Error {
    /// Input that decoded fine but failed a domain check (bad email syntax,
    /// start date in the past, activity outside the trip range).
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist. The payload is the entity name,
    /// e.g. `Trip` renders as "Trip not found".
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The mail transport refused or failed to accept a message. Any state
    /// written before the dispatch attempt stays committed.
    #[error("email dispatch failed: {0}")]
    Dispatch(#[from] MailError),

    /// Store faults and other unexpected failures.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
