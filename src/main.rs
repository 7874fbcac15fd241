//! 인증 토큰 서비스 메인 애플리케이션
//!
//! Actix-web HTTP 서버와 토큰 검증 컨슈머를 함께 구동합니다.
//! 서버가 종료되면 컨슈머를 중단하고, 처리 중인 메시지가 끝날 때까지 기다린 뒤 종료합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use auth_token_service::config::{JwtConfig, KafkaConfig, ServerConfig};
use auth_token_service::db::Database;
use auth_token_service::messaging::{KafkaPublisher, KafkaSubscriber, MessagePublisher};
use auth_token_service::repositories::users::{MongoUserStore, UserStore};
use auth_token_service::routes::configure_all_routes;
use auth_token_service::services::auth::{BcryptPasswordHasher, CredentialAuthenticator, TokenCodec};
use auth_token_service::services::verification::{VerificationRequestHandler, VerificationWorker};
use auth_token_service::state::AppState;

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 인증 토큰 서비스 시작중...");

    // 서명 키는 시작 시 한 번만 로드
    let signing_key = JwtConfig::signing_key().map_err(|e| {
        error!("❌ 서명 키 로드 실패: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    let codec = Arc::new(TokenCodec::with_lifetime(
        &signing_key,
        chrono::Duration::hours(JwtConfig::expiration_hours()),
    ));

    let users = initialize_user_store().await?;

    // 메시징 초기화
    let kafka_config = KafkaConfig::from_env();
    info!("📡 Kafka 연결 중... ({})", kafka_config.brokers_string());

    let publisher: Arc<dyn MessagePublisher> = Arc::new(
        KafkaPublisher::with_config(&kafka_config).map_err(std::io::Error::other)?,
    );
    let subscriber = Arc::new(
        KafkaSubscriber::with_config(&kafka_config).map_err(std::io::Error::other)?,
    );

    let authenticator = Arc::new(CredentialAuthenticator::new(
        users.clone(),
        Arc::new(BcryptPasswordHasher::from_config()),
        codec.clone(),
    ));

    let handler = Arc::new(VerificationRequestHandler::new(
        codec,
        publisher.clone(),
        kafka_config.response_topic.clone(),
    ));
    let worker = VerificationWorker::new(subscriber, handler);
    let worker_handle = worker.start();

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    let state = web::Data::new(AppState::new(authenticator, users, publisher));
    let server_result = start_http_server(state).await;

    // HTTP 서버 종료 후 컨슈머 정리
    info!("🛑 토큰 검증 컨슈머 종료 대기중...");
    worker.shutdown(worker_handle).await;
    info!("👋 서비스 종료");

    server_result
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, Rate Limiting, 로깅, 경로 정규화 미들웨어를 포함합니다.
/// SIGINT/SIGTERM 을 받으면 진행 중인 요청을 마무리하고 반환합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: web::Data<AppState>) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/api/v1/health", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Rate Limiting 설정이 올바르지 않습니다",
            )
        })?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(state.clone())
            .configure(configure_all_routes)
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await
}

/// MongoDB 연결과 사용자 저장소를 초기화합니다
///
/// 이메일 유니크 인덱스를 보장한 뒤 저장소를 반환합니다.
async fn initialize_user_store() -> std::io::Result<Arc<dyn UserStore>> {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(Database::new().await.map_err(|e| {
        error!("❌ 데이터베이스 연결 실패: {}", e);
        std::io::Error::other(e)
    })?);

    let store = MongoUserStore::new(database);
    store.create_indexes().await.map_err(|e| {
        error!("❌ 사용자 인덱스 생성 실패: {}", e);
        std::io::Error::other(e)
    })?;

    Ok(Arc::new(store))
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => {
            let _ = dotenv::from_filename(".env.prod");
        }
        "dev" => {
            let _ = dotenv::from_filename(".env.dev");
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// # Environment Variables
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
///
/// ```bash
/// RUST_LOG=auth_token_service::services=debug cargo run --features kafka
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
    info!(
        "Current profile: {}",
        std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string())
    );
}

/// CORS 설정을 구성합니다
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
