//! HMAC-SHA256 서명 키
//!
//! 시작 시 base64 값에서 한 번 생성되고 이후 변경되지 않습니다.
//! [`TokenCodec`](super::token_codec::TokenCodec) 에 명시적으로 전달됩니다.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::errors::ConfigError;

/// 대칭 서명 키
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey {
    bytes: Vec<u8>,
}

impl SigningKey {
    /// 표준 base64 문자열에서 키를 생성합니다. 앞뒤 공백은 무시합니다.
    ///
    /// # Errors
    ///
    /// * `ConfigError::InvalidSigningKey` - 디코딩 실패 또는 빈 키
    pub fn from_base64(encoded: &str) -> Result<Self, ConfigError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| ConfigError::InvalidSigningKey(format!("base64 디코딩 실패: {}", e)))?;

        Self::from_bytes(bytes)
    }

    /// 원시 바이트에서 키를 생성합니다.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let bytes = bytes.into();

        if bytes.is_empty() {
            return Err(ConfigError::InvalidSigningKey("빈 키는 사용할 수 없습니다".to_string()));
        }

        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

// 키 바이트는 로그에 남기지 않는다
impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey(<redacted>, {} bytes)", self.bytes.len())
    }
}
