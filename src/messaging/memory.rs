//! 프로세스 내 메시지 전송 구현
//!
//! 브로커 없이 검증 파이프라인을 구동할 때 사용합니다.
//! 발행된 메시지와 커밋된 오프셋을 기록하므로 테스트에서 결과를 확인할 수 있습니다.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::errors::MessagingError;

use super::channel::{ConsumedMessage, MessagePublisher, MessageSubscriber};

/// 발행된 메시지 기록
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub topic: String,
    pub key: String,
    pub payload: Vec<u8>,
}

impl PublishedMessage {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.payload).unwrap_or(serde_json::Value::Null)
    }
}

/// 발행 내용을 메모리에 기록하는 퍼블리셔
#[derive(Default)]
pub struct InMemoryPublisher {
    published: Mutex<Vec<PublishedMessage>>,
    unavailable: AtomicBool,
}

impl InMemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` 이면 이후의 발행과 ping 이 실패합니다.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// 지금까지 성공적으로 발행된 메시지
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published
            .lock()
            .map(|published| published.clone())
            .unwrap_or_default()
    }

    fn check_available(&self) -> Result<(), MessagingError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(MessagingError::Connection("broker unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MessagePublisher for InMemoryPublisher {
    async fn publish(&self, topic: &str, key: &str, payload: &[u8]) -> Result<(), MessagingError> {
        self.check_available()
            .map_err(|e| MessagingError::Publish(e.to_string()))?;

        self.published
            .lock()
            .map_err(|e| MessagingError::Publish(e.to_string()))?
            .push(PublishedMessage {
                topic: topic.to_string(),
                key: key.to_string(),
                payload: payload.to_vec(),
            });

        Ok(())
    }

    async fn ping(&self) -> Result<(), MessagingError> {
        self.check_available()
    }
}

/// [`InMemorySubscriber`] 에 메시지를 밀어 넣는 송신 핸들
///
/// 핸들이 모두 drop 되고 대기 중인 메시지가 소진되면 구독자는 `Closed` 를 반환합니다.
pub struct InMemoryFeeder {
    topic: String,
    sender: mpsc::UnboundedSender<ConsumedMessage>,
    next_offset: AtomicI64,
}

impl InMemoryFeeder {
    /// 단일 파티션(0)에 순차 오프셋으로 메시지를 추가합니다.
    pub fn send(&self, payload: impl Into<Vec<u8>>) -> Result<i64, MessagingError> {
        let offset = self.next_offset.fetch_add(1, Ordering::SeqCst);
        let message = ConsumedMessage {
            topic: self.topic.clone(),
            partition: 0,
            offset,
            key: None,
            payload: payload.into(),
        };

        self.sender
            .send(message)
            .map_err(|_| MessagingError::Closed)?;

        Ok(offset)
    }
}

/// 채널 기반 구독자
pub struct InMemorySubscriber {
    receiver: tokio::sync::Mutex<mpsc::UnboundedReceiver<ConsumedMessage>>,
    committed: Mutex<Vec<(i32, i64)>>,
}

impl InMemorySubscriber {
    /// `topic` 을 구독하는 구독자와 송신 핸들을 생성합니다.
    pub fn new(topic: &str) -> (InMemoryFeeder, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();

        let feeder = InMemoryFeeder {
            topic: topic.to_string(),
            sender,
            next_offset: AtomicI64::new(0),
        };
        let subscriber = Self {
            receiver: tokio::sync::Mutex::new(receiver),
            committed: Mutex::new(Vec::new()),
        };

        (feeder, subscriber)
    }

    /// 커밋된 `(partition, offset)` 목록 (커밋 순서)
    pub fn committed(&self) -> Vec<(i32, i64)> {
        self.committed
            .lock()
            .map(|committed| committed.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MessageSubscriber for InMemorySubscriber {
    async fn receive(&self) -> Result<ConsumedMessage, MessagingError> {
        self.receiver
            .lock()
            .await
            .recv()
            .await
            .ok_or(MessagingError::Closed)
    }

    async fn commit(&self, message: &ConsumedMessage) -> Result<(), MessagingError> {
        self.committed
            .lock()
            .map_err(|e| MessagingError::Commit(e.to_string()))?
            .push((message.partition, message.offset));

        Ok(())
    }
}
