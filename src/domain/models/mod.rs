//! 도메인 모델 모듈
//!
//! 저장되지 않고 계층 간에 전달되는 값 객체를 정의합니다.

pub mod token;
