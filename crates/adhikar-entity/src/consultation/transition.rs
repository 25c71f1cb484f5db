//! Consultation state transitions and their guards.
//!
//! A [`Transition`] is checked and applied by the store as one atomic unit:
//! PostgreSQL translates the guard into the `WHERE` clause of a single
//! `UPDATE`, the in-memory store runs [`Transition::check`] and
//! [`Transition::apply`] under one write lock.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use adhikar_core::error::AppError;
use adhikar_core::result::AppResult;
use adhikar_core::types::UserId;

use super::model::Consultation;
use super::status::ConsultationStatus;

/// How strictly transitions are guarded against the record's current state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransitionPolicy {
    /// Assignment only from the open queue, no transition out of `closed`.
    #[default]
    Strict,
    /// Only party checks; a later assignment overwrites an earlier one.
    LastWriterWins,
}

impl TransitionPolicy {
    /// Return the policy as its configuration string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::LastWriterWins => "last_writer_wins",
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransitionPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "last_writer_wins" => Ok(Self::LastWriterWins),
            other => Err(AppError::configuration(format!(
                "Unknown transition policy: '{other}'. Supported: strict, last_writer_wins"
            ))),
        }
    }
}

/// A state change requested on an existing consultation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A lawyer claims the consultation.
    Assign {
        /// Claiming lawyer.
        lawyer_id: UserId,
    },
    /// The assigned lawyer answers.
    Respond {
        /// Answering lawyer.
        lawyer_id: UserId,
        /// Non-empty answer text.
        response: String,
    },
    /// The owner or the assigned lawyer closes the consultation.
    Close {
        /// Closing party.
        requester_id: UserId,
    },
}

impl Transition {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Assign { .. } => "assign",
            Self::Respond { .. } => "respond",
            Self::Close { .. } => "close",
        }
    }

    /// Status the consultation ends up in once applied.
    pub fn target_status(&self) -> ConsultationStatus {
        match self {
            Self::Assign { .. } => ConsultationStatus::Assigned,
            Self::Respond { .. } => ConsultationStatus::Responded,
            Self::Close { .. } => ConsultationStatus::Closed,
        }
    }

    /// Check whether this transition may be applied to `current`.
    ///
    /// Party checks fail with an authorization error and state checks with
    /// a conflict, so callers can tell "not yours" from "too late".
    pub fn check(&self, current: &Consultation, policy: TransitionPolicy) -> AppResult<()> {
        let strict = policy == TransitionPolicy::Strict;

        match self {
            Self::Assign { .. } => {
                if strict && current.status.is_terminal() {
                    return Err(AppError::conflict("Consultation is closed"));
                }
                if strict && !current.is_unclaimed() {
                    return Err(AppError::conflict(
                        "Consultation is already assigned to a lawyer",
                    ));
                }
            }
            Self::Respond { lawyer_id, .. } => {
                if !current.is_assigned_to(*lawyer_id) {
                    return Err(AppError::authorization(
                        "You are not assigned to this consultation",
                    ));
                }
                if strict && current.status.is_terminal() {
                    return Err(AppError::conflict("Consultation is closed"));
                }
                if strict && !current.status.accepts_response() {
                    return Err(AppError::conflict(format!(
                        "Cannot respond to a consultation in status '{}'",
                        current.status
                    )));
                }
            }
            Self::Close { requester_id } => {
                if !current.is_owned_by(*requester_id) && !current.is_assigned_to(*requester_id)
                {
                    return Err(AppError::authorization(
                        "You are not authorized to close this consultation",
                    ));
                }
                if strict && current.status.is_terminal() {
                    return Err(AppError::conflict("Consultation is already closed"));
                }
            }
        }

        Ok(())
    }

    /// Apply this transition to `target`. Does not re-run the guard.
    pub fn apply(&self, target: &mut Consultation, at: DateTime<Utc>) {
        match self {
            Self::Assign { lawyer_id } => {
                target.assigned_lawyer_id = Some(*lawyer_id);
            }
            Self::Respond { response, .. } => {
                target.response = response.clone();
                target.response_date = Some(at);
            }
            Self::Close { .. } => {}
        }
        target.status = self.target_status();
        target.updated_at = at;
    }
}
