//! # adhikar-auth
//!
//! Credential primitives for the Jan Adhikar backend.
//!
//! ## Modules
//!
//! - `jwt`: signed bearer token creation and validation
//! - `password`: Argon2id password hashing and policy enforcement

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
