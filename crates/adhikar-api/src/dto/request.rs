//! Request bodies, validated at the boundary.
//!
//! Unknown fields are rejected. Missing fields default to empty so the
//! service layer can report them with its own messages.

use serde::Deserialize;
use validator::Validate;

use adhikar_service::auth::{BootstrapRequest, LoginRequest, RegisterRequest};
use adhikar_service::consultation::CreateConsultationRequest;

/// `POST /api/auth/init`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct InitBody {
    /// Admin username.
    pub username: String,
    /// Admin password.
    pub password: String,
}

impl From<InitBody> for BootstrapRequest {
    fn from(body: InitBody) -> Self {
        Self {
            username: body.username,
            password: body.password,
        }
    }
}

/// `POST /api/auth/register`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct RegisterBody {
    /// Desired username.
    pub username: String,
    /// Email address.
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: Option<String>,
    /// Plaintext password.
    pub password: String,
    /// Full name.
    #[serde(alias = "fullName")]
    pub full_name: String,
    /// `"user"` or `"lawyer"`.
    pub role: String,
    /// Area of practice, lawyers only.
    pub specialization: Option<String>,
}

impl From<RegisterBody> for RegisterRequest {
    fn from(body: RegisterBody) -> Self {
        Self {
            username: body.username,
            email: body.email.unwrap_or_default(),
            password: body.password,
            full_name: body.full_name,
            role: body.role,
            specialization: body.specialization,
        }
    }
}

/// `POST /api/auth/login`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct LoginBody {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

impl From<LoginBody> for LoginRequest {
    fn from(body: LoginBody) -> Self {
        Self {
            username: body.username,
            password: body.password,
        }
    }
}

/// `POST /api/consultations`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct CreateConsultationBody {
    /// Short summary.
    #[serde(alias = "query_title")]
    pub title: String,
    /// Full description.
    #[serde(alias = "detailed_question")]
    pub question: String,
    /// Category wire value.
    pub category: String,
    /// Urgency wire value.
    #[serde(alias = "urgency_level")]
    pub urgency: Option<String>,
    /// Free-text location.
    #[serde(alias = "user_location")]
    pub location: Option<String>,
    /// Contact channel.
    pub contact_preference: Option<String>,
    /// Answer language.
    pub language: Option<String>,
    /// Hide the owner from other parties.
    pub is_anonymous: Option<bool>,
}

impl From<CreateConsultationBody> for CreateConsultationRequest {
    fn from(body: CreateConsultationBody) -> Self {
        Self {
            title: body.title,
            question: body.question,
            category: body.category,
            urgency: body.urgency,
            location: body.location,
            contact_preference: body.contact_preference,
            language: body.language,
            is_anonymous: body.is_anonymous,
        }
    }
}

/// `PUT /api/consultations/{id}/respond`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct RespondBody {
    /// The lawyer's answer.
    pub response: String,
}
