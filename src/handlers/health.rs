//! 헬스체크 핸들러
//!
//! 로드밸런서와 모니터링 시스템이 사용합니다.
//! 사용자 저장소와 메시지 브로커가 모두 응답하면 200, 하나라도 실패하면 503 을 반환합니다.

use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::state::AppState;

fn status_label(up: bool) -> &'static str {
    if up { "up" } else { "down" }
}

/// 서비스 상태 확인
///
/// # Endpoint
/// `GET /api/v1/health`
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "auth_token_service",
///   "version": "0.1.0",
///   "timestamp": "2025-01-01T00:00:00Z",
///   "services": { "database": "up", "kafka": "up" }
/// }
/// ```
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (store, broker) = futures_util::join!(state.users.ping(), state.publisher.ping());

    if let Err(e) = &store {
        log::warn!("Health check: user store unavailable: {}", e);
    }
    if let Err(e) = &broker {
        log::warn!("Health check: message broker unavailable: {}", e);
    }

    let healthy = store.is_ok() && broker.is_ok();
    let body = json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "service": "auth_token_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "services": {
            "database": status_label(store.is_ok()),
            "kafka": status_label(broker.is_ok()),
        }
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
