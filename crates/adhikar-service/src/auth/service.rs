//! Credential verifier: accounts, passwords, and bearer tokens.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use adhikar_auth::jwt::{JwtDecoder, JwtEncoder};
use adhikar_auth::password::{PasswordHasher, PasswordValidator};
use adhikar_core::error::AppError;
use adhikar_core::result::AppResult;
use adhikar_database::UserStore;
use adhikar_database::store::{ALREADY_INITIALIZED_MESSAGE, DUPLICATE_USER_MESSAGE};
use adhikar_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;

const INVALID_CREDENTIALS: &str = "Invalid username or password";
const MISSING_CREDENTIALS: &str = "Please provide username and password";
const MISSING_FIELDS: &str = "Please provide all required fields";

/// Public self-registration input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Full name.
    pub full_name: String,
    /// `"user"` or `"lawyer"`.
    pub role: String,
    /// Area of practice; kept for lawyers only.
    pub specialization: Option<String>,
}

/// Login input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username, matched case-insensitively.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// First-admin bootstrap input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootstrapRequest {
    /// Admin username.
    pub username: String,
    /// Admin password.
    pub password: String,
}

/// A user together with a freshly issued bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    /// Bearer token.
    pub token: String,
    /// The account, without its password hash.
    pub user: User,
}

/// Handles account creation, login, and token verification.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    /// Checked against on unknown usernames; matches no account.
    dummy_hash: Option<Arc<str>>,
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        let dummy_hash = match hasher.hash_password("adhikar-unknown-account") {
            Ok(hash) => Some(Arc::from(hash)),
            Err(e) => {
                warn!(error = %e, "Could not prepare dummy password hash");
                None
            }
        };
        Self {
            users,
            hasher,
            validator,
            encoder,
            decoder,
            dummy_hash,
        }
    }

    /// Run one Argon2 verification for a username that has no account.
    fn verify_unknown_account(&self, password: &str) {
        if let Some(hash) = &self.dummy_hash {
            let _ = self.hasher.verify_password(password, hash);
        }
    }

    /// Register a citizen or lawyer and log them in.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<AuthSession> {
        let (Some(username), Some(email), Some(full_name), Some(role)) = (
            trimmed(&req.username),
            trimmed(&req.email),
            trimmed(&req.full_name),
            trimmed(&req.role),
        ) else {
            return Err(AppError::validation(MISSING_FIELDS));
        };
        if req.password.is_empty() {
            return Err(AppError::validation(MISSING_FIELDS));
        }

        let role = match role.as_str() {
            "user" => UserRole::User,
            "lawyer" => UserRole::Lawyer,
            _ => {
                return Err(AppError::validation(
                    r#"Role must be either "user" or "lawyer""#,
                ));
            }
        };

        self.validator.validate(&req.password)?;

        if self
            .users
            .find_by_username_or_email(&username, Some(&email))
            .await?
            .is_some()
        {
            return Err(AppError::conflict(DUPLICATE_USER_MESSAGE));
        }

        let specialization = match role {
            UserRole::Lawyer => req.specialization.as_deref().and_then(trimmed),
            _ => None,
        };

        let user = self
            .users
            .create(CreateUser {
                username,
                email: Some(email),
                password_hash: self.hasher.hash_password(&req.password)?,
                full_name: Some(full_name),
                role,
                specialization,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, role = %user.role, "User registered");
        self.session_for(user)
    }

    /// Verify a username and password.
    ///
    /// An unknown username and a wrong password fail identically.
    pub async fn login(&self, req: LoginRequest) -> AppResult<AuthSession> {
        let Some(username) = trimmed(&req.username) else {
            return Err(AppError::validation(MISSING_CREDENTIALS));
        };
        if req.password.is_empty() {
            return Err(AppError::validation(MISSING_CREDENTIALS));
        }

        let Some(user) = self.users.find_by_username(&username).await? else {
            self.verify_unknown_account(&req.password);
            warn!(username = %username, "Login failed: unknown user");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(&req.password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        info!(user_id = %user.id, "User logged in");
        self.session_for(user)
    }

    /// Create the first account, with the admin role.
    ///
    /// Refused forever once any account exists; that check runs before the
    /// input is looked at.
    pub async fn bootstrap_admin(&self, req: BootstrapRequest) -> AppResult<AuthSession> {
        if self.users.count().await? > 0 {
            return Err(AppError::conflict(ALREADY_INITIALIZED_MESSAGE));
        }

        let Some(username) = trimmed(&req.username) else {
            return Err(AppError::validation(MISSING_CREDENTIALS));
        };
        if req.password.is_empty() {
            return Err(AppError::validation(MISSING_CREDENTIALS));
        }
        self.validator.validate(&req.password)?;

        let user = self
            .users
            .create_first(CreateUser {
                username,
                email: None,
                password_hash: self.hasher.hash_password(&req.password)?,
                full_name: None,
                role: UserRole::Admin,
                specialization: None,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "Admin user initialized");
        self.session_for(user)
    }

    /// Resolve a bearer token to the caller's identity.
    pub fn authenticate(&self, token: &str) -> AppResult<RequestContext> {
        self.decoder.decode(token).map(RequestContext::from)
    }

    /// The caller's current account record.
    pub async fn current_user(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    fn session_for(&self, user: User) -> AppResult<AuthSession> {
        let issued = self.encoder.issue(user.id, user.role, &user.username)?;
        Ok(AuthSession {
            token: issued.token,
            user,
        })
    }
}
