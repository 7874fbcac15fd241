//! 인증 및 토큰 서비스 모듈
//!
//! # Features
//!
//! - HS256 JWT 발급/검증 ([`TokenCodec`])
//! - 이메일/비밀번호 로그인 및 회원가입 ([`CredentialAuthenticator`])
//! - bcrypt 비밀번호 해싱 ([`BcryptPasswordHasher`])
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명, 다른 알고리즘 선언은 거부
//! - 서명 키는 시작 시 한 번 로드되어 불변으로 공유
//! - 로그인 실패 응답은 원인과 무관하게 동일

pub mod signing_key;
pub mod token_codec;
pub mod password_hasher;
pub mod authenticator;

pub use signing_key::*;
pub use token_codec::*;
pub use password_hasher::*;
pub use authenticator::*;
