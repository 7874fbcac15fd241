//! API 라우트 설정 모듈
//!
//! 모든 엔드포인트는 `/api/v1` 아래에 등록됩니다.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | POST | `/api/v1/register` | [`handlers::auth::register`] |
//! | POST | `/api/v1/login` | [`handlers::auth::login`] |
//! | DELETE | `/api/v1/all` | [`handlers::auth::delete_all_users`] |
//! | GET | `/api/v1/health` | [`handlers::health::health_check`] |
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new()
//!     .app_data(state)
//!     .configure(configure_all_routes);
//! ```

use actix_web::{HttpRequest, error, web};

use crate::errors::AppError;
use crate::handlers;

/// 모든 라우트를 설정합니다
///
/// 잘못된 JSON 본문은 `AppError::ValidationError` 로 변환되어
/// 다른 에러와 같은 `{"error": "..."}` 형식으로 응답합니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));

    cfg.service(
        web::scope("/api/v1")
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::delete_all_users)
            .service(handlers::health::health_check),
    );
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("JSON 본문 파싱 실패: {}", err);
    AppError::ValidationError(format!("잘못된 요청 본문입니다: {}", err)).into()
}
