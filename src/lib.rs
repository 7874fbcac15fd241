//! 인증 토큰 서비스
//!
//! 이메일/비밀번호 자격 증명으로 사용자를 인증해 서명된 신원 토큰을 발급하고,
//! 동기 호출이 어려운 다른 서비스를 위해 메시지 버스로 토큰 검증 요청을 받아 처리합니다.
//!
//! # Features
//!
//! - **토큰 발급**: HS256 서명 JWT, 기본 수명 24시간
//! - **비동기 검증**: 요청 토픽 구독 → 토큰 검증 → 응답 토픽 발행 → 오프셋 커밋
//! - **회원가입/로그인**: bcrypt 비밀번호 해싱, 이메일 중복 방지
//! - **MongoDB**: 사용자 데이터 영구 저장
//! - **Kafka**: 검증 요청/응답 메시징 (`kafka` feature)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐          ┌──────────────────────┐
//! │   HTTP Routes   │          │  VerificationWorker  │ ← 요청 토픽 구독
//! └─────────────────┘          └──────────────────────┘
//!          │                              │
//!          ▼                              ▼
//! ┌─────────────────┐          ┌──────────────────────┐
//! │    Handlers     │          │ VerificationRequest  │
//! └─────────────────┘          │       Handler        │ → 응답 토픽 발행
//!          │                   └──────────────────────┘
//!          ▼                              │
//! ┌─────────────────┐                     │
//! │ Credential      │                     │
//! │ Authenticator   │                     │
//! └─────────────────┘                     │
//!          │          ┌────────────┐      │
//!          ├─────────▶│ TokenCodec │◀─────┘
//!          ▼          └────────────┘
//! ┌─────────────────┐
//! │    UserStore    │ ← MongoDB
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use auth_token_service::config::JwtConfig;
//! use auth_token_service::services::auth::TokenCodec;
//!
//! let key = JwtConfig::signing_key()?;
//! let codec = Arc::new(TokenCodec::new(&key));
//! let token = codec.mint(user.identity())?;
//! let claims = codec.decode(&token)?;
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod messaging;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
