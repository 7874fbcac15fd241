//! HTTP 핸들러가 공유하는 애플리케이션 상태
//!
//! `web::Data<AppState>` 로 등록되어 모든 워커 스레드가 같은 인스턴스를 참조합니다.

use std::sync::Arc;

use crate::messaging::MessagePublisher;
use crate::repositories::users::UserStore;
use crate::services::auth::CredentialAuthenticator;

pub struct AppState {
    pub authenticator: Arc<CredentialAuthenticator>,
    /// 헬스체크 대상 사용자 저장소
    pub users: Arc<dyn UserStore>,
    /// 헬스체크 대상 메시지 브로커
    pub publisher: Arc<dyn MessagePublisher>,
}

impl AppState {
    pub fn new(
        authenticator: Arc<CredentialAuthenticator>,
        users: Arc<dyn UserStore>,
        publisher: Arc<dyn MessagePublisher>,
    ) -> Self {
        Self {
            authenticator,
            users,
            publisher,
        }
    }
}
