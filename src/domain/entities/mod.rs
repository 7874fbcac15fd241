//! 도메인 엔티티 모듈
//!
//! 영구 저장소에 보관되는 엔티티를 정의합니다.

pub mod users;
