//! # 사용자 저장소 구현
//!
//! 인증 계층이 의존하는 [`UserStore`] 인터페이스와 MongoDB 구현을 제공합니다.
//!
//! ## 특징
//!
//! - **정수형 ID**: `counters` 컬렉션의 `$inc` upsert 로 사용자 ID 를 순차 할당
//! - **이메일 유니크 인덱스**: 동시 회원가입 경쟁 조건에서도 중복 계정이 생기지 않음
//! - **캐시 없음**: 조회는 항상 저장소에서 수행

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{
    Collection, IndexModel,
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
};
use serde::Deserialize;

use crate::db::Database;
use crate::domain::entities::users::user::{NewUser, User};
use crate::errors::StoreError;

const USERS_COLLECTION: &str = "users";
const COUNTERS_COLLECTION: &str = "counters";
const USER_ID_SEQUENCE: &str = "user_id";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 사용자 영구 저장소 인터페이스
///
/// 인증 서비스는 이 trait 에만 의존하므로 테스트에서는
/// [`InMemoryUserStore`](super::memory_repo::InMemoryUserStore) 로 대체할 수 있습니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 이메일로 사용자를 조회합니다. 없으면 `Ok(None)`.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// 사용자를 저장하고 ID 가 할당된 레코드를 반환합니다.
    ///
    /// 이메일이 이미 존재하면 `StoreError::Duplicate` 를 반환합니다.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// 모든 사용자를 삭제하고 삭제된 수를 반환합니다.
    async fn delete_all(&self) -> Result<u64, StoreError>;

    /// 저장소 연결 상태를 확인합니다.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Deserialize)]
struct Counter {
    seq: i64,
}

/// MongoDB 기반 사용자 저장소
pub struct MongoUserStore {
    db: Arc<Database>,
}

impl MongoUserStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn users(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(USERS_COLLECTION)
    }

    fn counters(&self) -> Collection<Counter> {
        self.db.get_database().collection::<Counter>(COUNTERS_COLLECTION)
    }

    async fn next_id(&self) -> Result<i64, StoreError> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters()
            .find_one_and_update(
                doc! { "_id": USER_ID_SEQUENCE },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .with_options(options)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        counter
            .map(|c| c.seq)
            .ok_or_else(|| StoreError::Backend("사용자 ID 시퀀스를 할당하지 못했습니다".to_string()))
    }

    /// 이메일 유니크 인덱스를 생성합니다. 시작 시 한 번 호출합니다.
    pub async fn create_indexes(&self) -> Result<(), StoreError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        self.users()
            .create_index(email_index)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.users()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let id = self.next_id().await?;
        let user = user.into_user(id);

        match self.users().insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(e) if is_duplicate_key(&e) => Err(StoreError::Duplicate(user.email)),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = self
            .users()
            .delete_many(doc! {})
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db
            .get_database()
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
