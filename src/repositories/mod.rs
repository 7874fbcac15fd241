//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 인증 서비스는 구체 타입이 아닌 `Arc<dyn UserStore>` 로 저장소를 주입받습니다.

pub mod users;
