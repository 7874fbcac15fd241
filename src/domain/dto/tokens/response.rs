use serde::{Deserialize, Serialize};

use crate::domain::models::token::claims::Identity;

/// 토큰 검증 결과 메시지
///
/// `valid` 가 `false` 이면 신원 필드는 직렬화되지 않습니다.
///
/// ```json
/// {"valid": true, "user_id": 1, "name": "A", "email": "a@x.com"}
/// {"valid": false}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl VerificationResult {
    pub fn invalid() -> Self {
        Self {
            valid: false,
            user_id: None,
            name: None,
            email: None,
        }
    }

    pub fn verified(identity: Identity) -> Self {
        Self {
            valid: true,
            user_id: Some(identity.subject_id),
            name: Some(identity.name),
            email: Some(identity.email),
        }
    }
}

/// 로그인 성공 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
