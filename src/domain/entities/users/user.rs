//! User Entity Implementation
//!
//! 사용자 저장소에 보관되는 사용자 레코드입니다.
//! 정수형 `_id` 는 토큰의 `id` 클레임(subject ID)으로 그대로 사용됩니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::models::token::claims::Identity;

/// 저장된 사용자 레코드
///
/// `password_hash` 는 bcrypt 해시이며 어떤 응답에도 포함되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// 사용자 고유 ID (토큰 subject)
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    /// 유니크 이메일
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime,
}

impl User {
    /// 토큰에 담길 신원 정보를 추출합니다.
    pub fn identity(&self) -> Identity {
        Identity {
            subject_id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// ID 할당 전의 신규 사용자
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            name,
            email,
            password_hash,
        }
    }

    /// 저장소가 할당한 ID로 사용자 레코드를 완성합니다.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            created_at: DateTime::now(),
        }
    }
}
