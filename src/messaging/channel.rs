//! 메시지 전송 계층 인터페이스

use async_trait::async_trait;

use crate::errors::MessagingError;

/// 구독 토픽에서 수신한 메시지
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumedMessage {
    /// 토픽 이름
    pub topic: String,
    /// 파티션 번호
    pub partition: i32,
    /// 파티션 내 오프셋
    pub offset: i64,
    /// 메시지 키
    pub key: Option<Vec<u8>>,
    /// 메시지 페이로드
    pub payload: Vec<u8>,
}

/// 메시지 발행 인터페이스
///
/// 구현체는 한 번 생성되어 `Arc` 로 공유되며, 동시 호출에 안전해야 합니다.
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// `topic` 에 `key` 로 파티셔닝된 메시지를 발행합니다.
    async fn publish(&self, topic: &str, key: &str, payload: &[u8]) -> Result<(), MessagingError>;

    /// 브로커 연결 상태를 확인합니다.
    async fn ping(&self) -> Result<(), MessagingError>;
}

/// 메시지 구독 인터페이스
///
/// 토픽 구독은 생성 시점에 이루어집니다. 자동 커밋은 사용하지 않습니다.
#[async_trait]
pub trait MessageSubscriber: Send + Sync {
    /// 다음 메시지를 기다립니다.
    ///
    /// 더 이상 메시지를 받을 수 없으면 `MessagingError::Closed` 를 반환합니다.
    async fn receive(&self) -> Result<ConsumedMessage, MessagingError>;

    /// 메시지의 오프셋을 커밋합니다. 다음 수신은 `offset + 1` 부터 시작합니다.
    async fn commit(&self, message: &ConsumedMessage) -> Result<(), MessagingError>;
}
