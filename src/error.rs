use log::{error, warn};
use mongodb::error::Error as DbError;
use rocket::{http::Status, response::Responder};
use thiserror::Error;

use crate::model::mongodb::{classify, DbFailure};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unprocessable: {0}")]
    Unprocessable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn unprocessable(what: impl Into<String>) -> Self {
        Self::Unprocessable(what.into())
    }

    /// The HTTP status this error is reported with.
    pub fn status(&self) -> Status {
        match self {
            Self::BadRequest(_) => Status::BadRequest,
            Self::NotFound(_) => Status::NotFound,
            Self::Unprocessable(_) => Status::UnprocessableEntity,
            Self::Internal(_) => Status::InternalServerError,
            Self::Db(err) => match classify(err) {
                DbFailure::Rejected => Status::UnprocessableEntity,
                DbFailure::Unavailable => Status::InternalServerError,
            },
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        if status.class() == rocket::http::StatusClass::ServerError {
            error!("{} {}: {self}", req.method(), req.uri());
        } else {
            warn!("{} {}: {self}", req.method(), req.uri());
        }
        // The registered catchers render the JSON error envelope.
        Err(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handled_errors_map_to_statuses() {
        assert_eq!(Error::not_found("Page 3").status(), Status::NotFound);
        assert_eq!(
            Error::unprocessable("Question with ID '1000'").status(),
            Status::UnprocessableEntity
        );
        assert_eq!(
            Error::BadRequest("nope".to_string()).status(),
            Status::BadRequest
        );
        assert_eq!(
            Error::Internal("counter".to_string()).status(),
            Status::InternalServerError
        );
    }

    #[test]
    fn store_errors_are_mapped_per_kind() {
        let rejected: DbError =
            <mongodb::bson::de::Error as serde::de::Error>::custom("bad document").into();
        assert_eq!(Error::Db(rejected).status(), Status::UnprocessableEntity);

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert_eq!(Error::Db(io.into()).status(), Status::InternalServerError);
    }
}
