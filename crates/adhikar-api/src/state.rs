//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use adhikar_auth::jwt::{JwtDecoder, JwtEncoder};
use adhikar_auth::password::{PasswordHasher, PasswordValidator};
use adhikar_core::config::AppConfig;
use adhikar_core::result::AppResult;
use adhikar_database::Stores;
use adhikar_entity::consultation::TransitionPolicy;
use adhikar_service::{AuthService, ConsultationService};

/// Shared dependencies, passed to every handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Identity and consultation stores.
    pub stores: Stores,
    /// Credential verifier.
    pub auth_service: Arc<AuthService>,
    /// Consultation workflow.
    pub consultation_service: Arc<ConsultationService>,
}

impl AppState {
    /// Wire services over the given stores.
    ///
    /// Fails when `workflow.transition_policy` is not a known policy.
    pub fn new(config: AppConfig, stores: Stores) -> AppResult<Self> {
        let policy: TransitionPolicy = config.workflow.transition_policy.parse()?;

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&stores.users),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config.auth)),
            Arc::new(JwtEncoder::new(&config.auth)),
            Arc::new(JwtDecoder::new(&config.auth)),
        ));

        let consultation_service = Arc::new(ConsultationService::new(
            Arc::clone(&stores.consultations),
            Arc::clone(&stores.users),
            policy,
        ));

        Ok(Self {
            config: Arc::new(config),
            stores,
            auth_service,
            consultation_service,
        })
    }
}
