//! 에러 타입 모듈
//!
//! 계층별 에러 타입과 HTTP 응답 변환을 제공합니다.

pub mod errors;

pub use errors::*;
