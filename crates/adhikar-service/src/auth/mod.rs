//! Registration, login, first-admin bootstrap, and token authentication.

pub mod service;

pub use service::{AuthService, AuthSession, BootstrapRequest, LoginRequest, RegisterRequest};
