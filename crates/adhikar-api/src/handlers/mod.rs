//! Route handlers.

pub mod auth;
pub mod consultation;
pub mod health;
