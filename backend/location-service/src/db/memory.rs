/// In-memory repositories for unit and HTTP tests
use super::{LocationRepository, RevocationLedger, UserRepository};
use crate::error::{AppError, Result};
use crate::models::{Location, User};
use async_trait::async_trait;
use chrono::Utc;
use crypto_core::TokenKind;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, username: &str, password_hash: &str) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == username) {
            return Err(AppError::Conflict(format!("User {} already exists", username)));
        }
        let user = User {
            id: users.len() as i64 + 1,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

#[derive(Default)]
pub struct MemoryLocationRepository {
    inner: Mutex<(i64, BTreeMap<i64, Location>)>,
}

#[async_trait]
impl LocationRepository for MemoryLocationRepository {
    async fn create(
        &self,
        user_id: i64,
        longitude: f64,
        latitude: f64,
        comment: Option<&str>,
    ) -> Result<Location> {
        let mut guard = self.inner.lock().unwrap();
        guard.0 += 1;
        let now = Utc::now();
        let location = Location {
            id: guard.0,
            user_id,
            longitude,
            latitude,
            comment: comment.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        guard.1.insert(location.id, location.clone());
        Ok(location)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>> {
        Ok(self.inner.lock().unwrap().1.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Location>> {
        let guard = self.inner.lock().unwrap();
        Ok(guard
            .1
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: i64,
        longitude: f64,
        latitude: f64,
        comment: Option<&str>,
    ) -> Result<Option<Location>> {
        let mut guard = self.inner.lock().unwrap();
        Ok(guard.1.get_mut(&id).map(|location| {
            location.longitude = longitude;
            location.latitude = latitude;
            location.comment = comment.map(str::to_string);
            location.updated_at = Utc::now();
            location.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<Option<Location>> {
        Ok(self.inner.lock().unwrap().1.remove(&id))
    }
}

/// Ledger that can be switched into a failing state
#[derive(Default)]
pub struct MemoryRevocationLedger {
    revoked: Mutex<HashMap<String, TokenKind>>,
    unavailable: AtomicBool,
}

impl MemoryRevocationLedger {
    pub fn len(&self) -> usize {
        self.revoked.lock().unwrap().len()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Database("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RevocationLedger for MemoryRevocationLedger {
    async fn revoke(&self, jti: &str, kind: TokenKind) -> Result<()> {
        self.check_available()?;
        self.revoked
            .lock()
            .unwrap()
            .entry(jti.to_string())
            .or_insert(kind);
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool> {
        self.check_available()?;
        Ok(self.revoked.lock().unwrap().contains_key(jti))
    }
}
