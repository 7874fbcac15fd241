//! # 메시징 모듈
//!
//! 토큰 검증 파이프라인이 사용하는 발행/구독 전송 계층입니다.
//!
//! - [`channel`] - 전송 계층 인터페이스 ([`MessagePublisher`], [`MessageSubscriber`])
//! - [`kafka`] - rdkafka 기반 구현 (`kafka` feature)
//! - [`memory`] - 프로세스 내 구현 (테스트 및 로컬 실행용)
//!
//! ## 전달 보장
//!
//! 컨슈머 그룹 단위로 파티션을 분배받고, 메시지 처리가 끝난 뒤 오프셋을 수동 커밋합니다.
//! 커밋 전에 프로세스가 종료되면 같은 메시지가 다시 전달될 수 있습니다 (at-least-once).

pub mod channel;
#[cfg(feature = "kafka")]
pub mod kafka;
pub mod memory;

pub use channel::*;
#[cfg(feature = "kafka")]
pub use kafka::*;
pub use memory::*;
