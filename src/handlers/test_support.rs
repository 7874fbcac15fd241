//! 핸들러 테스트용 애플리케이션 구성

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};

use crate::messaging::InMemoryPublisher;
use crate::repositories::users::InMemoryUserStore;
use crate::routes::configure_all_routes;
use crate::services::auth::{BcryptPasswordHasher, CredentialAuthenticator, SigningKey, TokenCodec};
use crate::state::AppState;

pub(crate) struct TestContext {
    pub store: Arc<InMemoryUserStore>,
    pub publisher: Arc<InMemoryPublisher>,
    pub codec: Arc<TokenCodec>,
    state: web::Data<AppState>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryUserStore::new());
        let publisher = Arc::new(InMemoryPublisher::new());
        let key = SigningKey::from_bytes(b"http-test-key".to_vec()).unwrap();
        let codec = Arc::new(TokenCodec::new(&key));
        let authenticator = Arc::new(CredentialAuthenticator::new(
            store.clone(),
            Arc::new(BcryptPasswordHasher::new(4)),
            codec.clone(),
        ));
        let state = web::Data::new(AppState::new(authenticator, store.clone(), publisher.clone()));

        Self {
            store,
            publisher,
            codec,
            state,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.state.clone())
            .configure(configure_all_routes)
    }
}
