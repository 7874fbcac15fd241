//! 메모리 기반 사용자 저장소
//!
//! 외부 저장소 없이 인증 흐름을 검증하기 위한 [`UserStore`] 구현입니다.
//! 이메일 유니크 제약과 순차 ID 할당을 MongoDB 구현과 동일하게 따릅니다.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::user_repo::UserStore;
use crate::domain::entities::users::user::{NewUser, User};
use crate::errors::StoreError;

#[derive(Default)]
struct Inner {
    users: HashMap<String, User>,
    next_id: i64,
}

/// `RwLock<HashMap>` 으로 보호되는 사용자 저장소
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 사용자 수
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> StoreError {
        StoreError::Backend("in-memory store lock poisoned".to_string())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(inner.users.get(email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned())?;

        if inner.users.contains_key(&user.email) {
            return Err(StoreError::Duplicate(user.email));
        }

        inner.next_id += 1;
        let user = user.into_user(inner.next_id);
        inner.users.insert(user.email.clone(), user.clone());

        Ok(user)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned())?;
        let deleted = inner.users.len() as u64;
        inner.users.clear();

        Ok(deleted)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.read().map(|_| ()).map_err(|_| Self::poisoned())
    }
}
