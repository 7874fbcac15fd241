//! 도메인 계층 모듈
//!
//! 엔티티, 값 객체, DTO 를 정의합니다. 외부 I/O 에 의존하지 않습니다.

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::users::{NewUser, User};
pub use models::token::{Identity, IdentityClaims};
pub use dto::tokens::{LoginResponse, VerificationRequest, VerificationResult};
pub use dto::users::{LoginRequest, RegisterRequest};
