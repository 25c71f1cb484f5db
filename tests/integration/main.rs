//! End-to-end tests driving the HTTP router against the in-memory store.

mod auth_test;
mod consultation_test;
mod helpers;
