//! # 토큰 검증 요청 처리기
//!
//! 요청 메시지 하나를 받아 검증 결과를 응답 토픽에 발행합니다.
//! 모든 분기가 종료 상태이며, 어떤 입력도 컨슈머 루프를 중단시키지 않습니다.
//!
//! | 입력 | 응답 | 키 |
//! |------|------|----|
//! | JSON 파싱 실패 | 없음 (drop) | - |
//! | 토큰 검증 실패 | `{"valid":false}` | `"fail"` |
//! | 토큰 검증 성공 | `{"valid":true,"user_id":..,"name":..,"email":..}` | 사용자 ID |
//!
//! 같은 메시지가 재전달되어도 같은 응답을 다시 발행할 뿐 부작용은 없습니다.

use std::sync::Arc;

use crate::domain::dto::tokens::{VerificationRequest, VerificationResult};
use crate::errors::TokenError;
use crate::messaging::MessagePublisher;
use crate::services::auth::TokenCodec;

/// 검증 실패 응답의 메시지 키
pub const FAILURE_KEY: &str = "fail";

/// 메시지 한 건의 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    /// 페이로드를 해석할 수 없어 응답 없이 버림
    Dropped,
    /// 응답 발행을 시도함. `published` 는 발행 성공 여부
    Responded {
        valid: bool,
        key: String,
        published: bool,
    },
}

/// 토큰 검증 요청 처리기
pub struct VerificationRequestHandler {
    codec: Arc<TokenCodec>,
    publisher: Arc<dyn MessagePublisher>,
    response_topic: String,
}

impl VerificationRequestHandler {
    pub fn new(
        codec: Arc<TokenCodec>,
        publisher: Arc<dyn MessagePublisher>,
        response_topic: impl Into<String>,
    ) -> Self {
        Self {
            codec,
            publisher,
            response_topic: response_topic.into(),
        }
    }

    /// 요청 페이로드 하나를 처리합니다.
    ///
    /// 발행 실패는 로그만 남기고 결과에 기록합니다. 오프셋 커밋은 호출자가 수행합니다.
    pub async fn handle(&self, payload: &[u8]) -> HandleOutcome {
        let request = match VerificationRequest::from_slice(payload) {
            Ok(request) => request,
            Err(e) => {
                log::warn!(
                    "Dropping malformed verification request ({} bytes): {}",
                    payload.len(),
                    e
                );
                return HandleOutcome::Dropped;
            }
        };

        let (key, result) = match self.codec.decode(&request.token) {
            Ok(claims) => {
                let identity = claims.identity();
                log::debug!("토큰 검증 성공 - 사용자 ID: {}", identity.subject_id);
                (identity.subject_id.to_string(), VerificationResult::verified(identity))
            }
            Err(e) => {
                log_rejection(&e);
                (FAILURE_KEY.to_string(), VerificationResult::invalid())
            }
        };

        let published = self.respond(&key, &result).await;

        HandleOutcome::Responded {
            valid: result.valid,
            key,
            published,
        }
    }

    async fn respond(&self, key: &str, result: &VerificationResult) -> bool {
        let body = match serde_json::to_vec(result) {
            Ok(body) => body,
            Err(e) => {
                log::error!("검증 결과 직렬화 실패: {}", e);
                return false;
            }
        };

        match self.publisher.publish(&self.response_topic, key, &body).await {
            Ok(()) => true,
            Err(e) => {
                log::error!(
                    "Failed to publish verification result to {} (key: {}): {}",
                    self.response_topic,
                    key,
                    e
                );
                false
            }
        }
    }
}

fn log_rejection(err: &TokenError) {
    match err {
        TokenError::Expired => log::info!("Token rejected: expired"),
        TokenError::InvalidSignature => log::warn!("Token rejected: invalid signature"),
        TokenError::UnsupportedAlgorithm(alg) => {
            log::warn!("Token rejected: unsupported algorithm {}", alg)
        }
        TokenError::MalformedClaims(detail) => {
            log::warn!("Token rejected: malformed claims ({})", detail)
        }
        TokenError::Malformed(detail) => log::info!("Token rejected: malformed ({})", detail),
        TokenError::Signing(detail) => log::error!("Token rejected: {}", detail),
    }
}
