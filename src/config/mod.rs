//! # Configuration Module
//!
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 환경, 비밀번호 해싱 설정
//! - [`auth_config`] - JWT 서명 키 및 토큰 수명 설정
//! - [`messaging_config`] - Kafka 브로커 및 토픽 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ### 필수 환경 변수
//!
//! ```bash
//! export JWT_SIGNING_KEY="base64-encoded-secret"
//! ```
//!
//! ### 선택적 환경 변수
//!
//! ```bash
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export BCRYPT_COST="12"          # 4-15 범위
//! export HOST="0.0.0.0"
//! export PORT="8082"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="auth_service"
//! export KAFKA_URL="localhost:9092"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod messaging_config;

pub use data_config::*;
pub use auth_config::*;
pub use messaging_config::*;
