//! Store traits and backend selection.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use adhikar_core::config::{DatabaseConfig, StoreConfig};
use adhikar_core::error::AppError;
use adhikar_core::result::AppResult;
use adhikar_core::types::{ConsultationId, UserId};
use adhikar_entity::consultation::{Consultation, Transition, TransitionPolicy};
use adhikar_entity::user::{CreateUser, User};

use crate::connection::DatabasePool;
use crate::memory::{MemoryConsultationStore, MemoryUserStore};
use crate::migration;
use crate::repositories::{ConsultationRepository, UserRepository};

/// Message returned when a unique username or email is taken.
pub const DUPLICATE_USER_MESSAGE: &str = "Username or email already exists";

/// Message returned when the first-user bootstrap finds existing accounts.
pub const ALREADY_INITIALIZED_MESSAGE: &str = "Admin user already initialized";

/// Persistent user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by id.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by username, case-insensitively.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find any user whose username or email matches either value,
    /// case-insensitively.
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: Option<&str>,
    ) -> AppResult<Option<User>>;

    /// Insert a user. Fails with a conflict when the username or email is
    /// already taken.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Insert a user only if the store holds no users at all. The
    /// emptiness check and the insert are atomic.
    async fn create_first(&self, data: CreateUser) -> AppResult<User>;

    /// Number of stored users.
    async fn count(&self) -> AppResult<u64>;
}

/// Persistent consultations.
///
/// List operations return newest first; records created at the same instant
/// keep their insertion order.
#[async_trait]
pub trait ConsultationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a freshly created consultation.
    async fn insert(&self, consultation: Consultation) -> AppResult<Consultation>;

    /// Find a consultation by id.
    async fn find_by_id(&self, id: ConsultationId) -> AppResult<Option<Consultation>>;

    /// Consultations owned by `user_id`.
    async fn list_by_owner(&self, user_id: UserId) -> AppResult<Vec<Consultation>>;

    /// Pending consultations no lawyer has claimed.
    async fn list_unassigned_pending(&self) -> AppResult<Vec<Consultation>>;

    /// Consultations assigned to `lawyer_id`, whatever their status.
    async fn list_by_lawyer(&self, lawyer_id: UserId) -> AppResult<Vec<Consultation>>;

    /// Check and apply `transition` to the consultation as one atomic write.
    ///
    /// Returns the updated record, `NotFound` when the id is unknown, or the
    /// guard's error when the transition is not allowed under `policy`.
    async fn transition(
        &self,
        id: ConsultationId,
        transition: &Transition,
        policy: TransitionPolicy,
    ) -> AppResult<Consultation>;
}

/// The pair of stores the services run against.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Identity store.
    pub users: Arc<dyn UserStore>,
    /// Consultation store.
    pub consultations: Arc<dyn ConsultationStore>,
    /// Database pool, when the PostgreSQL backend is active.
    pub pool: Option<DatabasePool>,
}

impl Stores {
    /// Build the stores selected by `store.backend`.
    ///
    /// The PostgreSQL backend connects and, when enabled, applies pending
    /// migrations before returning.
    pub async fn from_config(store: &StoreConfig, database: &DatabaseConfig) -> AppResult<Self> {
        match store.backend.as_str() {
            "postgres" => {
                info!("Initializing PostgreSQL stores");
                let pool = DatabasePool::connect(database).await?;
                if database.run_migrations {
                    migration::run_migrations(pool.pool()).await?;
                }
                Ok(Self {
                    users: Arc::new(UserRepository::new(pool.pool().clone())),
                    consultations: Arc::new(ConsultationRepository::new(pool.pool().clone())),
                    pool: Some(pool),
                })
            }
            "memory" => {
                info!("Initializing in-memory stores");
                Ok(Self::memory())
            }
            other => Err(AppError::configuration(format!(
                "Unknown store backend: '{other}'. Supported: memory, postgres"
            ))),
        }
    }

    /// Fresh, empty in-memory stores.
    pub fn memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::new()),
            consultations: Arc::new(MemoryConsultationStore::new()),
            pool: None,
        }
    }

    /// Whether the backing store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }
}
