//! JWT 신원 클레임 구조체
//!
//! 토큰 페이로드는 `id`, `name`, `email`, `iat`, `exp` 로 구성됩니다.
//! 디코딩 시 이 타입으로 역직렬화되며, 신원 필드가 누락되었거나 타입이 다르면
//! 서명이 유효하더라도 `MalformedClaims` 로 거부됩니다.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 토큰이 주장하는 사용자 신원
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: i64,
    pub name: String,
    pub email: String,
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `id`: 사용자 ID (subject)
/// - `name`: 사용자 이름
/// - `email`: 사용자 이메일
/// - `iat`: 발급 시간 (Unix timestamp). 이 필드가 없는 구버전 토큰도 허용합니다
/// - `exp`: 만료 시간 (Unix timestamp)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    pub exp: i64,
}

impl IdentityClaims {
    /// `issued_at` 에 발급되어 `lifetime` 후 만료되는 클레임을 생성합니다.
    pub fn issue(identity: Identity, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let expires_at = issued_at + lifetime;

        Self {
            id: identity.subject_id,
            name: identity.name,
            email: identity.email,
            iat: Some(issued_at.timestamp()),
            exp: expires_at.timestamp(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity {
            subject_id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
