//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! [`UserStore`](user_repo::UserStore) 인터페이스와 두 가지 구현을 제공합니다.
//!
//! - [`MongoUserStore`](user_repo::MongoUserStore) - 운영용 MongoDB 구현
//! - [`InMemoryUserStore`](memory_repo::InMemoryUserStore) - 테스트용 메모리 구현
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::users::{MongoUserStore, UserStore};
//!
//! let store: Arc<dyn UserStore> = Arc::new(MongoUserStore::new(database));
//! let user = store.find_by_email("user@example.com").await?;
//! ```

pub mod user_repo;
pub mod memory_repo;

pub use user_repo::*;
pub use memory_repo::*;
