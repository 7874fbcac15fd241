//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다.
//! 비즈니스 로직은 서비스 계층에 위임하고, 여기서는 입력 검증과 응답 변환만 담당합니다.
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 회원가입, 로그인, 전체 사용자 삭제
//!   - `POST /api/v1/register`
//!   - `POST /api/v1/login`
//!   - `DELETE /api/v1/all`
//! - **`health`**: 저장소와 브로커 상태 확인
//!   - `GET /api/v1/health`
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `AppResult<HttpResponse>` 를 반환하며,
//! `AppError` 가 상태 코드와 `{"error": "..."}` 본문으로 변환됩니다.

pub mod auth;
pub mod health;

#[cfg(test)]
pub(crate) mod test_support;
