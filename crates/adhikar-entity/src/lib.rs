//! # adhikar-entity
//!
//! Domain entity models for the Jan Adhikar backend. Every struct in this
//! crate represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.
//!
//! The consultation lifecycle rules live next to the record they govern in
//! [`consultation::transition`], so every store backend applies the same
//! guards.

pub mod consultation;
pub mod user;
