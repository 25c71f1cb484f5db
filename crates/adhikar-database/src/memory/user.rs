//! In-memory user store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use adhikar_core::error::AppError;
use adhikar_core::result::AppResult;
use adhikar_core::types::UserId;
use adhikar_entity::user::{CreateUser, User};

use crate::store::{ALREADY_INITIALIZED_MESSAGE, DUPLICATE_USER_MESSAGE, UserStore};

/// User store backed by a vector behind a `tokio` lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn clashes(existing: &User, username: &str, email: Option<&str>) -> bool {
    if same_name(&existing.username, username) {
        return true;
    }
    match (existing.email.as_deref(), email) {
        (Some(a), Some(b)) => same_name(a, b),
        _ => false,
    }
}

fn insert(users: &mut Vec<User>, data: CreateUser) -> AppResult<User> {
    if users
        .iter()
        .any(|u| clashes(u, &data.username, data.email.as_deref()))
    {
        return Err(AppError::conflict(DUPLICATE_USER_MESSAGE));
    }
    let user = data.into_user(UserId::new(), Utc::now());
    users.push(user.clone());
    Ok(user)
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| same_name(&u.username, username))
            .cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: Option<&str>,
    ) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| clashes(u, username, email)).cloned())
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        insert(&mut users, data)
    }

    async fn create_first(&self, data: CreateUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if !users.is_empty() {
            return Err(AppError::conflict(ALREADY_INITIALIZED_MESSAGE));
        }
        insert(&mut users, data)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.read().await.len() as u64)
    }
}
