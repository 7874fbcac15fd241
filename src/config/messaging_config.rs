//! Kafka 메시징 설정
//!
//! ```bash
//! export KAFKA_URL="localhost:9092"
//! export KAFKA_GROUP_ID="auth-service-consumer-group"
//! export KAFKA_REQUEST_TOPIC="token_verification_requests"
//! export KAFKA_RESPONSE_TOPIC="token_verification_responses"
//! ```

use std::env;

/// 토큰 검증 요청 토픽 기본값
pub const DEFAULT_REQUEST_TOPIC: &str = "token_verification_requests";

/// 토큰 검증 응답 토픽 기본값
pub const DEFAULT_RESPONSE_TOPIC: &str = "token_verification_responses";

/// 컨슈머 그룹 기본값
pub const DEFAULT_GROUP_ID: &str = "auth-service-consumer-group";

/// Kafka 연결 및 토픽 설정
#[derive(Debug, Clone, PartialEq)]
pub struct KafkaConfig {
    /// 브로커 목록
    pub brokers: Vec<String>,
    /// 컨슈머 그룹 ID
    pub group_id: String,
    /// 검증 요청을 구독할 토픽
    pub request_topic: String,
    /// 검증 결과를 발행할 토픽
    pub response_topic: String,
}

impl KafkaConfig {
    /// 환경 변수에서 설정을 읽습니다.
    ///
    /// `KAFKA_URL` 은 쉼표로 구분된 브로커 목록을 허용합니다.
    pub fn from_env() -> Self {
        let brokers = env::var("KAFKA_URL").unwrap_or_else(|_| "localhost:9092".to_string());

        Self {
            brokers: parse_brokers(&brokers),
            group_id: env::var("KAFKA_GROUP_ID").unwrap_or_else(|_| DEFAULT_GROUP_ID.to_string()),
            request_topic: env::var("KAFKA_REQUEST_TOPIC")
                .unwrap_or_else(|_| DEFAULT_REQUEST_TOPIC.to_string()),
            response_topic: env::var("KAFKA_RESPONSE_TOPIC")
                .unwrap_or_else(|_| DEFAULT_RESPONSE_TOPIC.to_string()),
        }
    }

    /// rdkafka `bootstrap.servers` 형식의 브로커 문자열
    pub fn brokers_string(&self) -> String {
        self.brokers.join(",")
    }
}

fn parse_brokers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect()
}
