//! The mongodb crate reports every failure through one error type.
//! This module sorts them into the two kinds the API cares about.

use mongodb::error::{Error as DbError, ErrorKind};

/// How a store failure should be reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbFailure {
    /// The store was reached but refused or could not process the operation.
    Rejected,
    /// The store could not be reached at all.
    Unavailable,
}

/// Classify the given store error.
pub fn classify(err: &DbError) -> DbFailure {
    match *err.kind {
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::Authentication { .. }
        | ErrorKind::InvalidTlsConfig { .. } => DbFailure::Unavailable,
        _ => DbFailure::Rejected,
    }
}
