//! # Authentication Configuration Module
//!
//! JWT 서명 키와 토큰 수명 설정을 관리합니다.
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! # 표준 base64 로 인코딩된 HMAC-SHA256 서명 키
//! export JWT_SIGNING_KEY="jubGgkvgopNQeq2NMzDt4EzwENu8EvgU+ed8V59OJOU="
//!
//! # 선택: 토큰 수명 (시간, 기본 24)
//! export JWT_EXPIRATION_HOURS="24"
//! ```
//!
//! 서명 키는 프로세스 시작 시 한 번만 로드되며, 이후 [`SigningKey`] 값으로
//! 명시적으로 전달됩니다. 전역 상태로 보관하지 않습니다.

use std::env;

use crate::errors::ConfigError;
use crate::services::auth::signing_key::SigningKey;

/// 서명 키 환경 변수 이름
pub const SIGNING_KEY_VAR: &str = "JWT_SIGNING_KEY";

/// 기본 토큰 수명 (시간)
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

/// 허용하는 최대 토큰 수명 (시간, 1년)
pub const MAX_TOKEN_LIFETIME_HOURS: i64 = 24 * 365;

/// JWT 토큰 설정
pub struct JwtConfig;

impl JwtConfig {
    /// 환경 변수에서 서명 키를 로드합니다.
    ///
    /// # Errors
    ///
    /// * `ConfigError::MissingVar` - `JWT_SIGNING_KEY` 가 설정되지 않음
    /// * `ConfigError::InvalidSigningKey` - base64 디코딩 실패 또는 빈 키
    ///
    /// 두 경우 모두 시작 단계의 치명적 오류로 취급합니다.
    pub fn signing_key() -> Result<SigningKey, ConfigError> {
        let encoded = env::var(SIGNING_KEY_VAR).map_err(|_| ConfigError::MissingVar(SIGNING_KEY_VAR))?;
        SigningKey::from_base64(&encoded)
    }

    /// 토큰 수명 (시간).
    ///
    /// 파싱할 수 없거나 1..=`MAX_TOKEN_LIFETIME_HOURS` 범위를 벗어나면 기본값 24를 사용합니다.
    pub fn expiration_hours() -> i64 {
        parse_expiration_hours(env::var("JWT_EXPIRATION_HOURS").ok().as_deref())
    }
}

fn parse_expiration_hours(raw: Option<&str>) -> i64 {
    match raw.map(|v| v.trim().parse::<i64>()) {
        Some(Ok(hours)) if (1..=MAX_TOKEN_LIFETIME_HOURS).contains(&hours) => hours,
        Some(_) => {
            log::warn!(
                "JWT_EXPIRATION_HOURS 값이 올바르지 않습니다. 기본값 {}시간 사용",
                DEFAULT_TOKEN_LIFETIME_HOURS
            );
            DEFAULT_TOKEN_LIFETIME_HOURS
        }
        None => DEFAULT_TOKEN_LIFETIME_HOURS,
    }
}
