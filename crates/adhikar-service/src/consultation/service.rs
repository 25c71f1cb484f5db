//! Consultation lifecycle: submission, listing, claiming, answering, closing.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use adhikar_core::error::AppError;
use adhikar_core::result::AppResult;
use adhikar_core::types::{ConsultationId, UserId};
use adhikar_database::{ConsultationStore, UserStore};
use adhikar_entity::consultation::{
    Consultation, ConsultationCategory, ConsultationLanguage, ContactPreference, MAX_LOCATION_CHARS,
    MAX_QUESTION_CHARS, MAX_TITLE_CHARS, NewConsultation, Transition, TransitionPolicy, UrgencyLevel,
};
use adhikar_entity::user::{User, UserRole, UserSummary};

use super::view::ConsultationView;
use crate::context::RequestContext;

const LAWYERS_ONLY: &str = "Only lawyers can access this endpoint";

/// Submission input. Enumerations arrive as their wire strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateConsultationRequest {
    /// Short summary.
    pub title: String,
    /// Full description.
    pub question: String,
    /// Category wire value, e.g. `property_dispute`.
    pub category: String,
    /// Urgency wire value; defaults to `medium`.
    pub urgency: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
    /// Contact channel; defaults to `email`.
    pub contact_preference: Option<String>,
    /// Answer language; defaults to `english`.
    pub language: Option<String>,
    /// Hide the owner from other parties.
    pub is_anonymous: Option<bool>,
}

fn parse_or_default<T>(value: Option<&str>) -> AppResult<T>
where
    T: std::str::FromStr<Err = AppError> + Default,
{
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.parse(),
        None => Ok(T::default()),
    }
}

impl CreateConsultationRequest {
    fn into_new(self, owner: UserId) -> AppResult<NewConsultation> {
        let title = self.title.trim();
        let question = self.question.trim();
        let category = self.category.trim();
        if title.is_empty() || question.is_empty() || category.is_empty() {
            return Err(AppError::validation("Please provide all required fields"));
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(AppError::validation(format!(
                "Title cannot exceed {MAX_TITLE_CHARS} characters"
            )));
        }
        if question.chars().count() > MAX_QUESTION_CHARS {
            return Err(AppError::validation(format!(
                "Question cannot exceed {MAX_QUESTION_CHARS} characters"
            )));
        }
        let location = self
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty());
        if location.is_some_and(|l| l.chars().count() > MAX_LOCATION_CHARS) {
            return Err(AppError::validation(format!(
                "Location cannot exceed {MAX_LOCATION_CHARS} characters"
            )));
        }

        Ok(NewConsultation {
            user_id: owner,
            title: title.to_string(),
            question: question.to_string(),
            category: category.parse::<ConsultationCategory>()?,
            urgency: parse_or_default::<UrgencyLevel>(self.urgency.as_deref())?,
            location: location.map(str::to_string),
            contact_preference: parse_or_default::<ContactPreference>(
                self.contact_preference.as_deref(),
            )?,
            language: parse_or_default::<ConsultationLanguage>(self.language.as_deref())?,
            is_anonymous: self.is_anonymous.unwrap_or(false),
        })
    }
}

/// Enforces the consultation state machine and its role and ownership rules.
#[derive(Debug, Clone)]
pub struct ConsultationService {
    consultations: Arc<dyn ConsultationStore>,
    users: Arc<dyn UserStore>,
    policy: TransitionPolicy,
}

impl ConsultationService {
    /// Creates a new consultation service.
    pub fn new(
        consultations: Arc<dyn ConsultationStore>,
        users: Arc<dyn UserStore>,
        policy: TransitionPolicy,
    ) -> Self {
        Self {
            consultations,
            users,
            policy,
        }
    }

    /// The policy transitions are guarded with.
    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Submit a new consultation. Only citizens may submit.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateConsultationRequest,
    ) -> AppResult<ConsultationView> {
        let caller = self.caller(ctx).await?;
        if caller.role != UserRole::User {
            return Err(AppError::authorization(
                "Only users can submit consultations",
            ));
        }

        let new = req.into_new(caller.id)?;
        let consultation = self
            .consultations
            .insert(new.into_consultation(ConsultationId::new(), Utc::now()))
            .await?;

        info!(
            consultation_id = %consultation.id,
            user_id = %caller.id,
            category = %consultation.category,
            "Consultation submitted"
        );

        Ok(ConsultationView::for_viewer(
            consultation,
            caller.id,
            Some(UserSummary::from(&caller)),
            None,
        ))
    }

    /// The caller's own consultations, newest first.
    pub async fn list_mine(&self, ctx: &RequestContext) -> AppResult<Vec<ConsultationView>> {
        let records = self.consultations.list_by_owner(ctx.user_id).await?;
        self.views(ctx.user_id, records).await
    }

    /// One consultation, if the caller may see it.
    pub async fn get_by_id(
        &self,
        ctx: &RequestContext,
        id: ConsultationId,
    ) -> AppResult<ConsultationView> {
        let consultation = self
            .consultations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Consultation not found"))?;

        let caller = self.caller(ctx).await?;
        if !consultation.is_visible_to(caller.id, caller.role) {
            return Err(AppError::authorization(
                "You are not authorized to view this consultation",
            ));
        }

        self.view(caller.id, consultation).await
    }

    /// The open queue: pending consultations no lawyer has claimed.
    pub async fn list_pending(&self, ctx: &RequestContext) -> AppResult<Vec<ConsultationView>> {
        let lawyer = self.require_lawyer(ctx, LAWYERS_ONLY).await?;
        let records = self.consultations.list_unassigned_pending().await?;
        self.views(lawyer.id, records).await
    }

    /// Consultations assigned to the calling lawyer, in any status.
    pub async fn list_assigned(&self, ctx: &RequestContext) -> AppResult<Vec<ConsultationView>> {
        let lawyer = self.require_lawyer(ctx, LAWYERS_ONLY).await?;
        let records = self.consultations.list_by_lawyer(lawyer.id).await?;
        self.views(lawyer.id, records).await
    }

    /// Claim a consultation for the calling lawyer.
    pub async fn assign(
        &self,
        ctx: &RequestContext,
        id: ConsultationId,
    ) -> AppResult<ConsultationView> {
        let lawyer = self
            .require_lawyer(ctx, "Only lawyers can assign consultations")
            .await?;
        self.apply(
            ctx,
            id,
            Transition::Assign {
                lawyer_id: lawyer.id,
            },
        )
        .await
    }

    /// Record the assigned lawyer's answer.
    pub async fn respond(
        &self,
        ctx: &RequestContext,
        id: ConsultationId,
        response: &str,
    ) -> AppResult<ConsultationView> {
        let response = response.trim();
        if response.is_empty() {
            return Err(AppError::validation("Response is required"));
        }
        self.apply(
            ctx,
            id,
            Transition::Respond {
                lawyer_id: ctx.user_id,
                response: response.to_string(),
            },
        )
        .await
    }

    /// Close a consultation on behalf of its owner or assigned lawyer.
    pub async fn close(
        &self,
        ctx: &RequestContext,
        id: ConsultationId,
    ) -> AppResult<ConsultationView> {
        self.apply(
            ctx,
            id,
            Transition::Close {
                requester_id: ctx.user_id,
            },
        )
        .await
    }

    async fn apply(
        &self,
        ctx: &RequestContext,
        id: ConsultationId,
        transition: Transition,
    ) -> AppResult<ConsultationView> {
        let updated = self
            .consultations
            .transition(id, &transition, self.policy)
            .await?;

        info!(
            consultation_id = %id,
            user_id = %ctx.user_id,
            transition = transition.name(),
            status = %updated.status,
            policy = %self.policy,
            "Consultation updated"
        );

        self.view(ctx.user_id, updated).await
    }

    /// Re-read the caller from the identity store.
    async fn caller(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))
    }

    async fn require_lawyer(&self, ctx: &RequestContext, message: &str) -> AppResult<User> {
        let caller = self.caller(ctx).await?;
        if !caller.is_lawyer() {
            return Err(AppError::authorization(message));
        }
        Ok(caller)
    }

    async fn view(&self, viewer: UserId, consultation: Consultation) -> AppResult<ConsultationView> {
        let mut views = self.views(viewer, vec![consultation]).await?;
        views
            .pop()
            .ok_or_else(|| AppError::internal("Consultation view missing"))
    }

    async fn views(
        &self,
        viewer: UserId,
        records: Vec<Consultation>,
    ) -> AppResult<Vec<ConsultationView>> {
        let mut summaries: HashMap<UserId, Option<UserSummary>> = HashMap::new();
        for record in &records {
            for id in std::iter::once(record.user_id).chain(record.assigned_lawyer_id) {
                if !summaries.contains_key(&id) {
                    let summary = self.users.find_by_id(id).await?.as_ref().map(UserSummary::from);
                    summaries.insert(id, summary);
                }
            }
        }

        Ok(records
            .into_iter()
            .map(|consultation| {
                let user = summaries.get(&consultation.user_id).cloned().flatten();
                let assigned_lawyer = consultation
                    .assigned_lawyer_id
                    .and_then(|id| summaries.get(&id).cloned().flatten());
                ConsultationView::for_viewer(consultation, viewer, user, assigned_lawyer)
            })
            .collect())
    }
}
