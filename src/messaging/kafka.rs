//! rdkafka 기반 메시지 전송 구현
//!
//! - 퍼블리셔: `FutureProducer`, 전송 큐 대기 최대 10초
//! - 구독자: `StreamConsumer`, 자동 커밋 비활성화, 최초 오프셋 `earliest`

use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::Message;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::{Offset, TopicPartitionList};

use crate::config::KafkaConfig;
use crate::errors::MessagingError;

use super::channel::{ConsumedMessage, MessagePublisher, MessageSubscriber};

const SEND_QUEUE_TIMEOUT: Duration = Duration::from_secs(10);
const METADATA_TIMEOUT: Duration = Duration::from_secs(5);

/// Kafka 퍼블리셔
///
/// `FutureProducer` 는 내부적으로 스레드 안전하므로 하나를 만들어 공유합니다.
pub struct KafkaPublisher {
    producer: FutureProducer,
}

impl KafkaPublisher {
    pub fn new(brokers: &str) -> Result<Self, MessagingError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "30000")
            .create()
            .map_err(|e| MessagingError::Connection(e.to_string()))?;

        Ok(Self { producer })
    }

    pub fn with_config(config: &KafkaConfig) -> Result<Self, MessagingError> {
        Self::new(&config.brokers_string())
    }
}

#[async_trait]
impl MessagePublisher for KafkaPublisher {
    async fn publish(&self, topic: &str, key: &str, payload: &[u8]) -> Result<(), MessagingError> {
        let record = FutureRecord::to(topic).key(key).payload(payload);

        self.producer
            .send(record, SEND_QUEUE_TIMEOUT)
            .await
            .map_err(|(err, _)| MessagingError::Publish(err.to_string()))?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), MessagingError> {
        let producer = self.producer.clone();

        // fetch_metadata 는 블로킹 호출
        tokio::task::spawn_blocking(move || {
            producer
                .client()
                .fetch_metadata(None, METADATA_TIMEOUT)
                .map(|_| ())
                .map_err(|e| MessagingError::Connection(e.to_string()))
        })
        .await
        .map_err(|e| MessagingError::Connection(e.to_string()))?
    }
}

/// Kafka 구독자
pub struct KafkaSubscriber {
    consumer: StreamConsumer,
}

impl KafkaSubscriber {
    /// 컨슈머 그룹 `group_id` 로 `topics` 를 구독합니다.
    pub fn new(brokers: &str, group_id: &str, topics: &[&str]) -> Result<Self, MessagingError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("group.id", group_id)
            .set("enable.auto.commit", "false")
            .set("session.timeout.ms", "30000")
            .set("auto.offset.reset", "earliest")
            .create()
            .map_err(|e| MessagingError::Connection(e.to_string()))?;

        consumer
            .subscribe(topics)
            .map_err(|e| MessagingError::Connection(e.to_string()))?;

        log::info!("Kafka 구독 시작 - 그룹: {}, 토픽: {:?}", group_id, topics);

        Ok(Self { consumer })
    }

    /// 설정의 요청 토픽을 구독합니다.
    pub fn with_config(config: &KafkaConfig) -> Result<Self, MessagingError> {
        Self::new(
            &config.brokers_string(),
            &config.group_id,
            &[config.request_topic.as_str()],
        )
    }
}

#[async_trait]
impl MessageSubscriber for KafkaSubscriber {
    async fn receive(&self) -> Result<ConsumedMessage, MessagingError> {
        let message = self
            .consumer
            .recv()
            .await
            .map_err(|e| MessagingError::Consume(e.to_string()))?;

        Ok(ConsumedMessage {
            topic: message.topic().to_string(),
            partition: message.partition(),
            offset: message.offset(),
            key: message.key().map(|k| k.to_vec()),
            payload: message.payload().unwrap_or_default().to_vec(),
        })
    }

    async fn commit(&self, message: &ConsumedMessage) -> Result<(), MessagingError> {
        let mut tpl = TopicPartitionList::new();
        tpl.add_partition_offset(&message.topic, message.partition, Offset::Offset(message.offset + 1))
            .map_err(|e| MessagingError::Commit(e.to_string()))?;

        self.consumer
            .commit(&tpl, CommitMode::Sync)
            .map_err(|e| MessagingError::Commit(e.to_string()))?;

        Ok(())
    }
}
