//! In-memory store backends for development and tests.

mod consultation;
mod user;

pub use consultation::MemoryConsultationStore;
pub use user::MemoryUserStore;
