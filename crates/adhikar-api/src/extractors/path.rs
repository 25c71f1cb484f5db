//! Typed path parameter helpers.

use adhikar_core::error::AppError;
use adhikar_core::types::ConsultationId;

/// Parse a consultation id from a path segment.
pub fn parse_consultation_id(raw: &str) -> Result<ConsultationId, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Invalid consultation id: {raw}")))
}
