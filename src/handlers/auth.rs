//! Authentication HTTP Handlers
//!
//! 이메일/비밀번호 기반 회원가입과 로그인을 처리합니다.
//! 로그인 성공 시 HS256 으로 서명된 JWT 를 발급합니다.

use actix_web::{HttpResponse, delete, post, web};
use serde_json::json;
use validator::Validate;

use crate::domain::{LoginRequest, LoginResponse, RegisterRequest};
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

/// 회원가입 핸들러
///
/// # Endpoint
/// `POST /api/v1/register`
///
/// # Errors
///
/// * 400 - 입력값 검증 실패
/// * 409 - 이미 등록된 이메일
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    state
        .authenticator
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "회원가입이 완료되었습니다"
    })))
}

/// 로컬 로그인 핸들러
///
/// 사용자가 없거나 비밀번호가 틀린 경우 모두 같은 401 응답을 반환합니다.
///
/// # Endpoint
/// `POST /api/v1/login`
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let token = state
        .authenticator
        .authenticate(&payload.email, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

/// 전체 사용자 삭제 핸들러
///
/// # Endpoint
/// `DELETE /api/v1/all`
#[delete("/all")]
pub async fn delete_all_users(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let deleted = state.authenticator.delete_all_users().await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "모든 사용자가 삭제되었습니다",
        "deleted": deleted
    })))
}
