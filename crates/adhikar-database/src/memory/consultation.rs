//! In-memory consultation store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use adhikar_core::error::AppError;
use adhikar_core::result::AppResult;
use adhikar_core::types::{ConsultationId, UserId};
use adhikar_entity::consultation::{Consultation, Transition, TransitionPolicy};

use crate::store::ConsultationStore;

/// Consultation store backed by an insertion-ordered vector.
#[derive(Debug, Clone, Default)]
pub struct MemoryConsultationStore {
    records: Arc<RwLock<Vec<Consultation>>>,
}

impl MemoryConsultationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn select<F>(&self, filter: F) -> Vec<Consultation>
    where
        F: Fn(&Consultation) -> bool,
    {
        let records = self.records.read().await;
        let mut selected: Vec<Consultation> =
            records.iter().filter(|&c| filter(c)).cloned().collect();
        // Stable: equal timestamps stay in insertion order.
        selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        selected
    }
}

#[async_trait]
impl ConsultationStore for MemoryConsultationStore {
    async fn insert(&self, consultation: Consultation) -> AppResult<Consultation> {
        let mut records = self.records.write().await;
        if records.iter().any(|c| c.id == consultation.id) {
            return Err(AppError::conflict("Consultation already exists"));
        }
        records.push(consultation.clone());
        Ok(consultation)
    }

    async fn find_by_id(&self, id: ConsultationId) -> AppResult<Option<Consultation>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|c| c.id == id).cloned())
    }

    async fn list_by_owner(&self, user_id: UserId) -> AppResult<Vec<Consultation>> {
        Ok(self.select(|c| c.is_owned_by(user_id)).await)
    }

    async fn list_unassigned_pending(&self) -> AppResult<Vec<Consultation>> {
        Ok(self.select(Consultation::is_unclaimed).await)
    }

    async fn list_by_lawyer(&self, lawyer_id: UserId) -> AppResult<Vec<Consultation>> {
        Ok(self.select(|c| c.is_assigned_to(lawyer_id)).await)
    }

    async fn transition(
        &self,
        id: ConsultationId,
        transition: &Transition,
        policy: TransitionPolicy,
    ) -> AppResult<Consultation> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found("Consultation not found"))?;

        transition.check(record, policy)?;
        transition.apply(record, Utc::now());

        debug!(
            consultation_id = %id,
            transition = transition.name(),
            status = %record.status,
            "Applied transition"
        );
        Ok(record.clone())
    }
}
