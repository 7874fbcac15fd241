//! 비밀번호 해싱
//!
//! 인증 서비스는 [`PasswordHasher`] trait 에만 의존합니다.
//! 운영 구현은 bcrypt 이며 cost 는 [`PasswordConfig`] 가 환경별로 결정합니다.

use crate::config::PasswordConfig;
use crate::errors::AuthError;

/// 비밀번호 해싱 능력
pub trait PasswordHasher: Send + Sync {
    /// 평문 비밀번호를 해싱합니다.
    fn hash(&self, plaintext: &str) -> Result<String, AuthError>;

    /// 저장된 해시와 평문 비밀번호가 일치하는지 확인합니다.
    ///
    /// 불일치는 `Ok(false)` 이며, 저장된 해시 자체가 손상된 경우에만 에러를 반환합니다.
    fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, AuthError>;
}

/// bcrypt 기반 해셔
///
/// - **솔트 자동 생성**: bcrypt 가 해시마다 고유 솔트를 생성
/// - **환경별 Cost**: 개발/테스트 4, 스테이징 10, 운영 12
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// 현재 환경 설정의 cost 로 생성합니다.
    pub fn from_config() -> Self {
        Self::new(PasswordConfig::bcrypt_cost())
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        let hash_start = std::time::Instant::now();
        let hashed = bcrypt::hash(plaintext, self.cost)
            .map_err(|e| AuthError::Hashing(format!("비밀번호 해싱 실패: {}", e)))?;

        log::debug!("Password hashing took: {:?}", hash_start.elapsed());
        Ok(hashed)
    }

    fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, AuthError> {
        let verify_start = std::time::Instant::now();
        let is_valid = bcrypt::verify(plaintext, hash)
            .map_err(|e| AuthError::Hashing(format!("비밀번호 검증 실패: {}", e)))?;

        log::debug!("Password verification took: {:?}", verify_start.elapsed());
        Ok(is_valid)
    }
}
