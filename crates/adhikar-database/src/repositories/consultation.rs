//! PostgreSQL consultation repository.
//!
//! Transitions run as one `UPDATE ... WHERE <guard> RETURNING *`, so two
//! lawyers racing to claim the same record cannot both succeed under the
//! strict policy.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, warn};

use adhikar_core::error::{AppError, ErrorKind};
use adhikar_core::result::AppResult;
use adhikar_core::types::{ConsultationId, UserId};
use adhikar_entity::consultation::{Consultation, Transition, TransitionPolicy};

use crate::store::ConsultationStore;

const NEWEST_FIRST: &str = "ORDER BY created_at DESC, seq ASC";

/// Repository for consultations.
#[derive(Debug, Clone)]
pub struct ConsultationRepository {
    pool: PgPool,
}

impl ConsultationRepository {
    /// Create a new consultation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_where(
        &self,
        condition: &str,
        party: Option<UserId>,
        context: &'static str,
    ) -> AppResult<Vec<Consultation>> {
        let sql = format!("SELECT * FROM consultations WHERE {condition} {NEWEST_FIRST}");
        let mut query = sqlx::query_as::<_, Consultation>(&sql);
        if let Some(id) = party {
            query = query.bind(id);
        }
        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, context, e))
    }
}

/// `SET` clause and guard of the conditional update for a transition.
///
/// `$1` is the consultation id, `$2` the acting user, `$3` the timestamp,
/// `$4` the response text when present.
fn update_sql(transition: &Transition, policy: TransitionPolicy) -> String {
    let strict = policy == TransitionPolicy::Strict;
    let (set, guard) = match transition {
        Transition::Assign { .. } => (
            "assigned_lawyer_id = $2, status = 'assigned'",
            if strict {
                "AND status = 'pending' AND assigned_lawyer_id IS NULL"
            } else {
                ""
            },
        ),
        Transition::Respond { .. } => (
            "response = $4, response_date = $3, status = 'responded'",
            if strict {
                "AND assigned_lawyer_id = $2 \
                 AND status IN ('assigned', 'in_progress', 'responded')"
            } else {
                "AND assigned_lawyer_id = $2"
            },
        ),
        Transition::Close { .. } => (
            "status = 'closed'",
            if strict {
                "AND (user_id = $2 OR assigned_lawyer_id = $2) AND status <> 'closed'"
            } else {
                "AND (user_id = $2 OR assigned_lawyer_id = $2)"
            },
        ),
    };
    format!("UPDATE consultations SET {set}, updated_at = $3 WHERE id = $1 {guard} RETURNING *")
}

fn actor(transition: &Transition) -> UserId {
    match transition {
        Transition::Assign { lawyer_id } | Transition::Respond { lawyer_id, .. } => *lawyer_id,
        Transition::Close { requester_id } => *requester_id,
    }
}

#[async_trait]
impl ConsultationStore for ConsultationRepository {
    async fn insert(&self, c: Consultation) -> AppResult<Consultation> {
        sqlx::query_as::<_, Consultation>(
            "INSERT INTO consultations \
             (id, user_id, title, question, category, urgency, location, contact_preference, \
              language, is_anonymous, status, assigned_lawyer_id, response, response_date, \
              created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING *",
        )
        .bind(c.id)
        .bind(c.user_id)
        .bind(&c.title)
        .bind(&c.question)
        .bind(c.category)
        .bind(c.urgency)
        .bind(&c.location)
        .bind(c.contact_preference)
        .bind(c.language)
        .bind(c.is_anonymous)
        .bind(c.status)
        .bind(c.assigned_lawyer_id)
        .bind(&c.response)
        .bind(c.response_date)
        .bind(c.created_at)
        .bind(c.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("consultations_user_id_fkey") =>
            {
                AppError::not_found("User not found")
            }
            other => {
                AppError::with_source(ErrorKind::Database, "Failed to create consultation", other)
            }
        })
    }

    async fn find_by_id(&self, id: ConsultationId) -> AppResult<Option<Consultation>> {
        sqlx::query_as::<_, Consultation>("SELECT * FROM consultations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find consultation", e)
            })
    }

    async fn list_by_owner(&self, user_id: UserId) -> AppResult<Vec<Consultation>> {
        self.list_where(
            "user_id = $1",
            Some(user_id),
            "Failed to list consultations by owner",
        )
        .await
    }

    async fn list_unassigned_pending(&self) -> AppResult<Vec<Consultation>> {
        self.list_where(
            "status = 'pending' AND assigned_lawyer_id IS NULL",
            None,
            "Failed to list pending consultations",
        )
        .await
    }

    async fn list_by_lawyer(&self, lawyer_id: UserId) -> AppResult<Vec<Consultation>> {
        self.list_where(
            "assigned_lawyer_id = $1",
            Some(lawyer_id),
            "Failed to list consultations by lawyer",
        )
        .await
    }

    async fn transition(
        &self,
        id: ConsultationId,
        transition: &Transition,
        policy: TransitionPolicy,
    ) -> AppResult<Consultation> {
        let sql = update_sql(transition, policy);
        let mut query = sqlx::query_as::<_, Consultation>(&sql)
            .bind(id)
            .bind(actor(transition))
            .bind(Utc::now());
        if let Transition::Respond { response, .. } = transition {
            query = query.bind(response.as_str());
        }

        let updated = query.fetch_optional(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update consultation", e)
        })?;

        if let Some(consultation) = updated {
            debug!(
                consultation_id = %id,
                transition = transition.name(),
                status = %consultation.status,
                "Applied transition"
            );
            return Ok(consultation);
        }

        // Nothing matched: explain why from the current row.
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Consultation not found"))?;
        transition.check(&current, policy)?;

        warn!(
            consultation_id = %id,
            transition = transition.name(),
            "Transition lost a concurrent update"
        );
        Err(AppError::conflict(
            "Consultation was modified concurrently, please retry",
        ))
    }
}
