//! 비동기 토큰 검증 파이프라인
//!
//! ```text
//! request topic ──▶ VerificationWorker ──▶ VerificationRequestHandler ──▶ response topic
//!                         │                        │
//!                         └── commit ◀─────────────┘ (발행 시도 후)
//! ```

pub mod handler;
pub mod worker;

pub use handler::*;
pub use worker::*;
