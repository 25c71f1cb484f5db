//! # adhikar-database
//!
//! Persistence for the Jan Adhikar backend. The service layer only sees the
//! [`UserStore`] and [`ConsultationStore`] traits; [`Stores::from_config`]
//! picks the PostgreSQL repositories or the in-memory stores.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{ConsultationStore, Stores, UserStore};
