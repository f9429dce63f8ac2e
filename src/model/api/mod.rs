//! Types sent to and received from clients.

pub mod category;
pub mod question;
pub mod quiz;

use rocket::http::Status;
use serde::{Deserialize, Serialize};

/// Body of every handled error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn for_status(status: Status) -> Self {
        let message = match status.code {
            400 => "bad request",
            404 => "resource not found",
            405 => "method not allowed",
            422 => "unprocessable",
            500 => "internal server error",
            _ => status.reason_lossy(),
        };
        Self {
            success: false,
            error: status.code,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_messages() {
        let envelope = ErrorEnvelope::for_status(Status::NotFound);
        assert_eq!(
            envelope,
            ErrorEnvelope {
                success: false,
                error: 404,
                message: "resource not found".to_string(),
            }
        );
        assert_eq!(
            ErrorEnvelope::for_status(Status::UnprocessableEntity).message,
            "unprocessable"
        );
        assert_eq!(
            ErrorEnvelope::for_status(Status::MethodNotAllowed).message,
            "method not allowed"
        );
        assert_eq!(
            ErrorEnvelope::for_status(Status::ImATeapot).message,
            "I'm a teapot"
        );
    }
}
