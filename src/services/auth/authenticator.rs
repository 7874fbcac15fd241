//! # 자격 증명 인증 서비스
//!
//! 이메일/비밀번호 로그인과 회원가입을 담당합니다.
//!
//! ## 로그인 흐름
//!
//! ```text
//! authenticate(email, password)
//!   ├─ UserStore::find_by_email ── 없음 ──▶ UserNotFound
//!   ├─ PasswordHasher::verify ──── 불일치 ─▶ InvalidCredentials
//!   └─ TokenCodec::mint ─────────────────▶ token
//! ```
//!
//! `UserNotFound` 와 `InvalidCredentials` 는 로그에서만 구분되고,
//! HTTP 응답에서는 같은 401 메시지로 변환됩니다 (계정 존재 여부 노출 방지).

use std::sync::Arc;

use crate::domain::entities::users::user::NewUser;
use crate::errors::{AuthError, StoreError};
use crate::repositories::users::UserStore;

use super::password_hasher::PasswordHasher;
use super::token_codec::TokenCodec;

/// 자격 증명 인증기
///
/// 모든 의존성은 생성 시 명시적으로 주입됩니다.
///
/// ```rust,ignore
/// let authenticator = CredentialAuthenticator::new(store, hasher, codec);
/// authenticator.register("A", "a@x.com", "secret").await?;
/// let token = authenticator.authenticate("a@x.com", "secret").await?;
/// ```
pub struct CredentialAuthenticator {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    codec: Arc<TokenCodec>,
}

impl CredentialAuthenticator {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            users,
            hasher,
            codec,
        }
    }

    /// 자격 증명을 확인하고 서명된 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::UserNotFound` - 이메일에 해당하는 사용자 없음
    /// * `AuthError::InvalidCredentials` - 비밀번호 불일치
    /// * `AuthError::Store` / `AuthError::Hashing` - 저장소 또는 해시 오류
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                log::warn!("Login attempt failed: user not found for email: {}", email);
                return Err(AuthError::UserNotFound);
            }
        };

        let hasher = self.hasher.clone();
        let stored_hash = user.password_hash.clone();
        let plaintext = password.to_string();
        let matches = run_blocking(move || hasher.verify(&stored_hash, &plaintext)).await?;

        if !matches {
            log::warn!("Login attempt failed: incorrect password for email: {}", email);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.codec.mint(user.identity())?;
        log::info!("로그인 성공 - 사용자 ID: {}", user.id);

        Ok(token)
    }

    /// 새 사용자를 등록합니다. 토큰은 발급하지 않습니다.
    ///
    /// 사전 조회와 저장소의 유니크 제약 두 단계에서 중복을 검사하므로,
    /// 동시에 같은 이메일로 가입해도 한 건만 성공합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::EmailAlreadyExists` - 이미 등록된 이메일
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), AuthError> {
        if self.users.find_by_email(email).await?.is_some() {
            log::info!("Registration rejected: email already exists: {}", email);
            return Err(AuthError::EmailAlreadyExists);
        }

        let hasher = self.hasher.clone();
        let plaintext = password.to_string();
        let password_hash = run_blocking(move || hasher.hash(&plaintext)).await?;
        let new_user = NewUser::new(name.to_string(), email.to_string(), password_hash);

        match self.users.create(new_user).await {
            Ok(user) => {
                log::info!("사용자 생성 완료 - ID: {}", user.id);
                Ok(())
            }
            Err(StoreError::Duplicate(_)) => {
                log::info!("Registration rejected by unique index: {}", email);
                Err(AuthError::EmailAlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 모든 사용자를 삭제합니다.
    pub async fn delete_all_users(&self) -> Result<u64, AuthError> {
        let deleted = self.users.delete_all().await?;
        log::warn!("전체 사용자 삭제 - {}건", deleted);

        Ok(deleted)
    }
}

/// bcrypt 연산은 수백 ms 가 걸리므로 blocking 스레드 풀에서 실행합니다.
async fn run_blocking<T, F>(task: F) -> Result<T, AuthError>
where
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AuthError::Hashing(format!("해싱 작업 실패: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::users::InMemoryUserStore;
    use crate::services::auth::password_hasher::BcryptPasswordHasher;
    use crate::services::auth::signing_key::SigningKey;

    struct Fixture {
        store: Arc<InMemoryUserStore>,
        codec: Arc<TokenCodec>,
        authenticator: CredentialAuthenticator,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryUserStore::new());
        let key = SigningKey::from_bytes(b"authenticator-test-key".to_vec()).unwrap();
        let codec = Arc::new(TokenCodec::new(&key));
        let authenticator = CredentialAuthenticator::new(
            store.clone(),
            Arc::new(BcryptPasswordHasher::new(4)),
            codec.clone(),
        );

        Fixture {
            store,
            codec,
            authenticator,
        }
    }

    #[tokio::test]
    async fn test_wrong_password_then_correct_password() {
        let f = fixture();
        f.authenticator.register("A", "a@x.com", "right").await.unwrap();

        let first = f.authenticator.authenticate("a@x.com", "wrong").await;
        assert!(matches!(first, Err(AuthError::InvalidCredentials)));

        let token = f.authenticator.authenticate("a@x.com", "right").await.unwrap();
        let claims = f.codec.decode(&token).unwrap();
        let stored = f.store.find_by_email("a@x.com").await.unwrap().unwrap();

        assert_eq!(claims.identity(), stored.identity());
    }

    #[tokio::test]
    async fn test_unknown_email_is_user_not_found() {
        let f = fixture();

        let result = f.authenticator.authenticate("ghost@x.com", "pw").await;

        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_register_same_email_twice_leaves_store_unchanged() {
        let f = fixture();
        f.authenticator.register("A", "a@x.com", "pw").await.unwrap();
        let before = f.store.find_by_email("a@x.com").await.unwrap();

        let second = f.authenticator.register("Other", "a@x.com", "pw2").await;

        assert!(matches!(second, Err(AuthError::EmailAlreadyExists)));
        assert_eq!(f.store.len(), 1);
        assert_eq!(f.store.find_by_email("a@x.com").await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let f = fixture();
        f.authenticator.register("A", "a@x.com", "plain-pw").await.unwrap();

        let stored = f.store.find_by_email("a@x.com").await.unwrap().unwrap();

        assert_ne!(stored.password_hash, "plain-pw");
        assert!(stored.password_hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_delete_all_users() {
        let f = fixture();
        f.authenticator.register("A", "a@x.com", "pw").await.unwrap();
        f.authenticator.register("B", "b@x.com", "pw").await.unwrap();

        assert_eq!(f.authenticator.delete_all_users().await.unwrap(), 2);
        assert!(matches!(
            f.authenticator.authenticate("a@x.com", "pw").await,
            Err(AuthError::UserNotFound)
        ));
    }

    /// 호출된 스레드를 기록하는 해셔
    struct ThreadRecordingHasher {
        inner: BcryptPasswordHasher,
        threads: std::sync::Mutex<Vec<std::thread::ThreadId>>,
    }

    impl PasswordHasher for ThreadRecordingHasher {
        fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
            self.threads.lock().unwrap().push(std::thread::current().id());
            self.inner.hash(plaintext)
        }

        fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, AuthError> {
            self.threads.lock().unwrap().push(std::thread::current().id());
            self.inner.verify(hash, plaintext)
        }
    }

    #[tokio::test]
    async fn test_hashing_runs_off_the_async_thread() {
        let hasher = Arc::new(ThreadRecordingHasher {
            inner: BcryptPasswordHasher::new(4),
            threads: std::sync::Mutex::new(Vec::new()),
        });
        let key = SigningKey::from_bytes(b"authenticator-test-key".to_vec()).unwrap();
        let authenticator = CredentialAuthenticator::new(
            Arc::new(InMemoryUserStore::new()),
            hasher.clone(),
            Arc::new(TokenCodec::new(&key)),
        );

        authenticator.register("A", "a@x.com", "pw").await.unwrap();
        authenticator.authenticate("a@x.com", "pw").await.unwrap();

        let async_thread = std::thread::current().id();
        let threads = hasher.threads.lock().unwrap().clone();
        assert_eq!(threads.len(), 2);
        assert!(threads.iter().all(|id| *id != async_thread));
    }
}
