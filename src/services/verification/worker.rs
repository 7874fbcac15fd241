//! # 토큰 검증 컨슈머 루프
//!
//! 요청 토픽을 구독하는 전용 태스크입니다. 메시지는 수신 순서대로 하나씩 처리되며
//! 응답 발행을 시도한 뒤에 오프셋을 커밋합니다.
//!
//! 종료 시에는 새 메시지 대기를 멈추고, 처리 중이던 메시지의 발행과 커밋을 마친 뒤 빠져나옵니다.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::errors::MessagingError;
use crate::messaging::{ConsumedMessage, MessageSubscriber};

use super::handler::{HandleOutcome, VerificationRequestHandler};

const RECEIVE_RETRY_DELAY: Duration = Duration::from_secs(1);

/// 검증 요청 컨슈머 워커
pub struct VerificationWorker {
    subscriber: Arc<dyn MessageSubscriber>,
    handler: Arc<VerificationRequestHandler>,
    cancel_token: CancellationToken,
}

impl VerificationWorker {
    pub fn new(
        subscriber: Arc<dyn MessageSubscriber>,
        handler: Arc<VerificationRequestHandler>,
    ) -> Self {
        Self {
            subscriber,
            handler,
            cancel_token: CancellationToken::new(),
        }
    }

    /// 컨슈머 루프를 시작합니다.
    pub fn start(&self) -> JoinHandle<()> {
        let subscriber = self.subscriber.clone();
        let handler = self.handler.clone();
        let token = self.cancel_token.clone();

        tokio::spawn(async move {
            log::info!("🎧 토큰 검증 컨슈머 시작");

            loop {
                let received = tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    received = subscriber.receive() => received,
                };

                match received {
                    Ok(message) => Self::process(&subscriber, &handler, message).await,
                    Err(MessagingError::Closed) => {
                        log::warn!("구독 채널이 닫혀 컨슈머를 종료합니다");
                        break;
                    }
                    Err(e) => {
                        log::error!("메시지 수신 실패: {}", e);
                        tokio::select! {
                            _ = token.cancelled() => break,
                            _ = tokio::time::sleep(RECEIVE_RETRY_DELAY) => {}
                        }
                    }
                }
            }

            log::info!("토큰 검증 컨슈머 종료");
        })
    }

    async fn process(
        subscriber: &Arc<dyn MessageSubscriber>,
        handler: &Arc<VerificationRequestHandler>,
        message: ConsumedMessage,
    ) {
        let outcome = handler.handle(&message.payload).await;
        log::debug!(
            "{}[{}]@{} 처리 완료: {:?}",
            message.topic,
            message.partition,
            message.offset,
            outcome
        );

        if let HandleOutcome::Responded { published: false, .. } = outcome {
            log::warn!(
                "Committing {}[{}]@{} without a published response",
                message.topic,
                message.partition,
                message.offset
            );
        }

        if let Err(e) = subscriber.commit(&message).await {
            log::error!(
                "Failed to commit offset {}[{}]@{}: {}",
                message.topic,
                message.partition,
                message.offset,
                e
            );
        }
    }

    /// 새 메시지 대기를 중단하도록 신호를 보냅니다.
    pub fn stop(&self) {
        self.cancel_token.cancel();
    }

    /// 루프를 중단하고 처리 중인 메시지가 끝날 때까지 기다립니다.
    pub async fn shutdown(&self, handle: JoinHandle<()>) {
        self.stop();

        if let Err(e) = handle.await {
            log::error!("토큰 검증 컨슈머 태스크 비정상 종료: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::domain::models::token::claims::Identity;
    use crate::messaging::{InMemoryPublisher, InMemorySubscriber, MessagePublisher};
    use crate::services::auth::{SigningKey, TokenCodec};

    struct Fixture {
        codec: Arc<TokenCodec>,
        publisher: Arc<InMemoryPublisher>,
        subscriber: Arc<InMemorySubscriber>,
        worker: VerificationWorker,
    }

    fn fixture() -> (crate::messaging::InMemoryFeeder, Fixture) {
        let key = SigningKey::from_bytes(b"worker-test-key".to_vec()).unwrap();
        let codec = Arc::new(TokenCodec::new(&key));
        let publisher = Arc::new(InMemoryPublisher::new());
        let (feeder, subscriber) = InMemorySubscriber::new("token_verification_requests");
        let subscriber = Arc::new(subscriber);
        let handler = Arc::new(VerificationRequestHandler::new(
            codec.clone(),
            publisher.clone(),
            "token_verification_responses",
        ));
        let worker = VerificationWorker::new(subscriber.clone(), handler);

        (
            feeder,
            Fixture {
                codec,
                publisher,
                subscriber,
                worker,
            },
        )
    }

    async fn wait_for_commits(subscriber: &InMemorySubscriber, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while subscriber.committed().len() < count {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_every_message_is_committed_in_order() {
        let (feeder, f) = fixture();
        let token = f
            .codec
            .mint(Identity {
                subject_id: 7,
                name: "G".to_string(),
                email: "g@x.com".to_string(),
            })
            .unwrap();

        feeder.send(b"garbage".to_vec()).unwrap();
        feeder.send(br#"{"token": "not-a-real-token"}"#.to_vec()).unwrap();
        feeder
            .send(serde_json::to_vec(&serde_json::json!({ "token": token })).unwrap())
            .unwrap();

        let handle = f.worker.start();
        wait_for_commits(&f.subscriber, 3).await;
        f.worker.shutdown(handle).await;

        assert_eq!(f.subscriber.committed(), vec![(0, 0), (0, 1), (0, 2)]);
        let keys: Vec<String> = f.publisher.published().into_iter().map(|m| m.key).collect();
        assert_eq!(keys, vec!["fail".to_string(), "7".to_string()]);
    }

    #[tokio::test]
    async fn test_publish_failure_does_not_block_commit() {
        let (feeder, f) = fixture();
        f.publisher.set_unavailable(true);
        feeder.send(br#"{"token": "x"}"#.to_vec()).unwrap();

        let handle = f.worker.start();
        wait_for_commits(&f.subscriber, 1).await;
        f.worker.shutdown(handle).await;

        assert_eq!(f.subscriber.committed(), vec![(0, 0)]);
        assert!(f.publisher.published().is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_while_idle_joins_promptly() {
        let (_feeder, f) = fixture();
        let handle = f.worker.start();

        tokio::time::timeout(Duration::from_secs(5), f.worker.shutdown(handle))
            .await
            .unwrap();

        assert!(f.subscriber.committed().is_empty());
    }

    #[tokio::test]
    async fn test_loop_exits_when_channel_closes() {
        let (feeder, f) = fixture();
        feeder.send(br#"{"token": "x"}"#.to_vec()).unwrap();
        drop(feeder);

        let handle = f.worker.start();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(f.subscriber.committed(), vec![(0, 0)]);
    }

    /// 발행 시작을 알린 뒤 일정 시간 후에 완료되는 퍼블리셔
    struct SlowPublisher {
        started: Notify,
        delay: Duration,
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MessagePublisher for SlowPublisher {
        async fn publish(&self, _topic: &str, key: &str, _payload: &[u8]) -> Result<(), MessagingError> {
            self.started.notify_one();
            tokio::time::sleep(self.delay).await;
            self.sent.lock().unwrap().push(key.to_string());
            Ok(())
        }

        async fn ping(&self) -> Result<(), MessagingError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_shutdown_mid_publish_finishes_publish_and_commit() {
        let key = SigningKey::from_bytes(b"worker-test-key".to_vec()).unwrap();
        let codec = Arc::new(TokenCodec::new(&key));
        let publisher = Arc::new(SlowPublisher {
            started: Notify::new(),
            delay: Duration::from_millis(300),
            sent: Mutex::new(Vec::new()),
        });
        let (feeder, subscriber) = InMemorySubscriber::new("token_verification_requests");
        let subscriber = Arc::new(subscriber);
        let handler = Arc::new(VerificationRequestHandler::new(
            codec.clone(),
            publisher.clone(),
            "token_verification_responses",
        ));
        let worker = VerificationWorker::new(subscriber.clone(), handler);

        let token = codec
            .mint(Identity {
                subject_id: 5,
                name: "E".to_string(),
                email: "e@x.com".to_string(),
            })
            .unwrap();
        feeder
            .send(serde_json::to_vec(&serde_json::json!({ "token": token })).unwrap())
            .unwrap();

        let handle = worker.start();
        tokio::time::timeout(Duration::from_secs(5), publisher.started.notified())
            .await
            .unwrap();
        tokio::time::timeout(Duration::from_secs(5), worker.shutdown(handle))
            .await
            .unwrap();

        assert_eq!(*publisher.sent.lock().unwrap(), vec!["5".to_string()]);
        assert_eq!(subscriber.committed(), vec![(0, 0)]);
    }
}
