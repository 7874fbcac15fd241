//! # 서비스 계층
//!
//! - [`auth`] - 토큰 발급/검증, 자격 증명 인증, 회원가입
//! - [`verification`] - 메시지 기반 비동기 토큰 검증

pub mod auth;
pub mod verification;
