//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 토큰 발급/검증, 자격 증명 인증, 저장소, 메시징 계층의 에러를 정의합니다.
//! 각 계층은 자신의 에러 타입을 반환하고, HTTP 경계에서만 [`AppError`]로 변환됩니다.
//!
//! ## 에러 분류
//!
//! | 계층 | 타입 | 변형 |
//! |------|------|------|
//! | 토큰 | [`TokenError`] | `Malformed`, `UnsupportedAlgorithm`, `InvalidSignature`, `Expired`, `MalformedClaims` |
//! | 인증 | [`AuthError`] | `UserNotFound`, `InvalidCredentials`, `EmailAlreadyExists`, `Store`, `Hashing` |
//! | 저장소 | [`StoreError`] | `Duplicate`, `Backend` |
//! | 메시징 | [`MessagingError`] | `Connection`, `Publish`, `Consume`, `Commit`, `Closed` |
//! | 설정 | [`ConfigError`] | `MissingVar`, `InvalidSigningKey` |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::{AppError, AuthError};
//!
//! async fn login(auth: &CredentialAuthenticator, email: &str, password: &str) -> Result<String, AppError> {
//!     // UserNotFound 와 InvalidCredentials 는 같은 401 응답으로 변환됩니다
//!     Ok(auth.authenticate(email, password).await?)
//! }
//! ```

use thiserror::Error;

/// 로그인 실패 시 클라이언트에 노출되는 단일 메시지
///
/// 계정 존재 여부를 추측할 수 없도록 사용자 없음/비밀번호 불일치 모두 이 메시지를 사용합니다.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "잘못된 이메일 또는 비밀번호입니다";

/// 5xx 응답 본문에 사용되는 일반 메시지
pub const INTERNAL_ERROR_MESSAGE: &str = "요청 처리 중 서버 오류가 발생했습니다";

/// HTTP 경계의 애플리케이션 에러 타입
///
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
/// 5xx 계열은 상세 내용을 로그에만 남기고 응답에는 일반 메시지만 담습니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 클라이언트에 노출해도 되는 메시지
    fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg) => msg.clone(),
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.status()
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 응답 형식은 `{"error": "..."}` 입니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status();

        if status.is_server_error() {
            log::error!("요청 처리 실패 ({}): {}", status.as_u16(), self);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "error": self.public_message()
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 토큰 디코딩/서명 에러
///
/// 호출자 관점에서는 모두 "유효하지 않은 토큰"이지만 로그에서는 구분됩니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// 구조적으로 올바르지 않은 토큰 (세그먼트 수, base64, JSON 등)
    #[error("malformed token: {0}")]
    Malformed(String),

    /// 헤더가 HS256 이외의 알고리즘을 선언함
    #[error("unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// 서명 검증 실패
    #[error("invalid token signature")]
    InvalidSignature,

    /// `exp` 가 현재 시각 이전
    #[error("token expired")]
    Expired,

    /// 서명은 유효하지만 신원 클레임이 누락되었거나 타입이 다름
    #[error("malformed claims: {0}")]
    MalformedClaims(String),

    /// 토큰 서명 생성 실패
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// 사용자 저장소 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// 유니크 제약 위반 (이메일 중복)
    #[error("duplicate key: {0}")]
    Duplicate(String),

    /// 저장소 연결/쿼리 실패
    #[error("store failure: {0}")]
    Backend(String),
}

/// 자격 증명 인증 및 회원가입 에러
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("user not found")]
    UserNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email already exists")]
    EmailAlreadyExists,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserNotFound | AuthError::InvalidCredentials => {
                AppError::AuthenticationError(INVALID_CREDENTIALS_MESSAGE.to_string())
            }
            AuthError::EmailAlreadyExists => {
                AppError::ConflictError("이미 사용 중인 이메일입니다".to_string())
            }
            AuthError::Store(e) => AppError::DatabaseError(e.to_string()),
            AuthError::Hashing(msg) => AppError::InternalError(msg),
            AuthError::Token(e) => AppError::InternalError(e.to_string()),
        }
    }
}

/// 메시징 계층 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessagingError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("publish error: {0}")]
    Publish(String),

    #[error("consume error: {0}")]
    Consume(String),

    #[error("commit error: {0}")]
    Commit(String),

    /// 구독 채널이 닫혀 더 이상 메시지를 받을 수 없음
    #[error("channel closed")]
    Closed,
}

/// 시작 시 설정 로딩 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),

    #[error("invalid signing key: {0}")]
    InvalidSigningKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("duplicate".to_string());

        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_user_not_found_and_invalid_credentials_are_indistinguishable() {
        let not_found = AppError::from(AuthError::UserNotFound);
        let mismatch = AppError::from(AuthError::InvalidCredentials);

        assert_eq!(not_found.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(mismatch.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(not_found.public_message(), mismatch.public_message());
        assert_eq!(not_found.public_message(), INVALID_CREDENTIALS_MESSAGE);
    }

    #[test]
    fn test_store_failure_does_not_leak_detail() {
        let error = AppError::from(AuthError::Store(StoreError::Backend(
            "connection refused: mongodb://10.0.0.3".to_string(),
        )));

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.public_message(), INTERNAL_ERROR_MESSAGE);
        assert!(error.to_string().contains("connection refused"));
    }

    #[test]
    fn test_email_already_exists_maps_to_conflict() {
        let error = AppError::from(AuthError::EmailAlreadyExists);

        assert_eq!(error.status(), StatusCode::CONFLICT);
    }
}
