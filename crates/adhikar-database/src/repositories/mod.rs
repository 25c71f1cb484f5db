//! PostgreSQL store implementations.

pub mod consultation;
pub mod user;

pub use consultation::ConsultationRepository;
pub use user::UserRepository;
