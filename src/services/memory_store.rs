use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::{
    models::{User, UserPayload},
    services::UserStore,
    utils::error::StoreError,
};

/// In-process `UserStore` used by the handler tests.
///
/// Mirrors the table semantics: ids start at 1 and are never reused,
/// and email must be unique.
#[derive(Default)]
pub struct InMemoryUserStore {
    state: Mutex<State>,
}

/// Store call that can be made to fail on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Get,
    Insert,
    Replace,
    Delete,
}

const ALL_OPS: [StoreOp; 5] = [
    StoreOp::List,
    StoreOp::Get,
    StoreOp::Insert,
    StoreOp::Replace,
    StoreOp::Delete,
];

#[derive(Default)]
struct State {
    last_id: i64,
    users: BTreeMap<i64, User>,
    failing: Vec<StoreOp>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail like an unreachable database.
    pub fn set_unavailable(&self) {
        self.state.lock().unwrap().failing = ALL_OPS.to_vec();
    }

    /// Makes only `op` fail; other calls keep working.
    pub fn fail_on(&self, op: StoreOp) {
        self.state.lock().unwrap().failing.push(op);
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl State {
    fn check_available(&self, op: StoreOp) -> Result<(), StoreError> {
        if self.failing.contains(&op) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }

    fn check_email_free(&self, email: &str, owner: Option<i64>) -> Result<(), StoreError> {
        let taken = self
            .users
            .values()
            .any(|u| u.email == email && Some(u.id) != owner);

        if taken {
            return Err(StoreError::Constraint(format!("email {} already exists", email)));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let state = self.state.lock().unwrap();
        state.check_available(StoreOp::List)?;
        Ok(state.users.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<User, StoreError> {
        let state = self.state.lock().unwrap();
        state.check_available(StoreOp::Get)?;
        state.users.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn insert(&self, user: UserPayload) -> Result<User, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.check_available(StoreOp::Insert)?;
        state.check_email_free(&user.email, None)?;

        state.last_id += 1;
        let created = User {
            id: state.last_id,
            name: user.name,
            email: user.email,
        };
        state.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn replace(&self, user: &User) -> Result<User, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.check_available(StoreOp::Replace)?;
        if !state.users.contains_key(&user.id) {
            return Err(StoreError::NotFound);
        }
        state.check_email_free(&user.email, Some(user.id))?;

        state.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.check_available(StoreOp::Delete)?;
        state.users.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str) -> UserPayload {
        UserPayload {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = InMemoryUserStore::new();

        let first = store.insert(payload("A", "a@x.com")).await.unwrap();
        store.delete_by_id(first.id).await.unwrap();
        let second = store.insert(payload("B", "b@x.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(payload("A", "a@x.com")).await.unwrap();

        let result = store.insert(payload("B", "a@x.com")).await;

        assert!(matches!(result, Err(StoreError::Constraint(_))));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_replace_keeps_own_email() {
        let store = InMemoryUserStore::new();
        let mut user = store.insert(payload("A", "a@x.com")).await.unwrap();

        user.name = "Z".to_string();
        let replaced = store.replace(&user).await.unwrap();

        assert_eq!(replaced.name, "Z");
    }

    #[tokio::test]
    async fn test_fail_on_only_affects_one_operation() {
        let store = InMemoryUserStore::new();
        let user = store.insert(payload("A", "a@x.com")).await.unwrap();
        store.fail_on(StoreOp::Delete);

        assert!(matches!(
            store.delete_by_id(user.id).await,
            Err(StoreError::Database(_))
        ));
        assert_eq!(store.get_by_id(user.id).await.unwrap(), user);
        assert!(!store.is_empty());
    }

    #[tokio::test]
    async fn test_missing_records() {
        let store = InMemoryUserStore::new();
        let ghost = User {
            id: 42,
            name: String::new(),
            email: String::new(),
        };

        assert!(matches!(store.get_by_id(42).await, Err(StoreError::NotFound)));
        assert!(matches!(store.replace(&ghost).await, Err(StoreError::NotFound)));
        assert!(matches!(store.delete_by_id(42).await, Err(StoreError::NotFound)));
    }
}
