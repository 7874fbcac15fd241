//! 토큰 검증 메시지 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
