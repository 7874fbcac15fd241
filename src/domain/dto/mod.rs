//! 데이터 전송 객체(DTO) 모듈
//!
//! HTTP 요청 본문과 메시지 페이로드의 직렬화 형식을 정의합니다.
//!
//! - [`users`] - 회원가입/로그인 요청
//! - [`tokens`] - 토큰 검증 요청/응답 메시지, 로그인 응답

pub mod users;
pub mod tokens;
