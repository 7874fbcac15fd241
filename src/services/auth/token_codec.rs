//! JWT 토큰 발급/검증 코덱
//!
//! HS256 으로 서명된 compact JWS 를 생성하고 검증합니다.
//!
//! ## 검증 순서
//!
//! 1. 헤더 파싱 → 실패 시 `Malformed`
//! 2. 알고리즘이 정확히 HS256 인지 확인 → 아니면 `UnsupportedAlgorithm`
//! 3. 서명 검증 → 실패 시 `InvalidSignature`
//! 4. `exp` 확인 (leeway 0) → 지났으면 `Expired`
//! 5. 신원 클레임 타입 확인 → 누락/타입 불일치 시 `MalformedClaims`

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};

use crate::config::DEFAULT_TOKEN_LIFETIME_HOURS;
use crate::domain::models::token::claims::{Identity, IdentityClaims};
use crate::errors::TokenError;

use super::signing_key::SigningKey;

/// JWT 토큰 코덱
///
/// 서명 키로부터 인코딩/디코딩 키를 한 번만 만들어 보관합니다.
/// 내부 상태가 불변이므로 `Arc<TokenCodec>` 로 HTTP 경로와 컨슈머 루프가 공유합니다.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenCodec {
    /// 기본 수명(24시간)의 코덱을 생성합니다.
    pub fn new(key: &SigningKey) -> Self {
        Self::with_lifetime(key, Duration::hours(DEFAULT_TOKEN_LIFETIME_HOURS))
    }

    pub fn with_lifetime(key: &SigningKey, lifetime: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            validation,
            lifetime,
        }
    }

    /// 현재 시각 기준으로 토큰을 발급합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = codec.mint(user.identity())?;
    /// ```
    pub fn mint(&self, identity: Identity) -> Result<String, TokenError> {
        self.mint_at(identity, Utc::now())
    }

    /// 지정한 발급 시각으로 토큰을 발급합니다.
    pub fn mint_at(&self, identity: Identity, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = IdentityClaims::issue(identity, issued_at, self.lifetime);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// 토큰을 검증하고 신원 클레임을 추출합니다.
    ///
    /// 서명과 만료를 먼저 검증한 뒤 클레임 타입을 확인하므로,
    /// 서명되지 않은 토큰이 `MalformedClaims` 로 분류되는 일은 없습니다.
    pub fn decode(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        let data = decode::<serde_json::Value>(token, &self.decoding_key, &self.validation)
            .map_err(classify)?;

        serde_json::from_value::<IdentityClaims>(data.claims)
            .map_err(|e| TokenError::MalformedClaims(e.to_string()))
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::MissingAlgorithm => TokenError::UnsupportedAlgorithm(err.to_string()),
        ErrorKind::MissingRequiredClaim(claim) => {
            TokenError::MalformedClaims(format!("missing required claim: {}", claim))
        }
        _ => TokenError::Malformed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
    use serde_json::json;

    fn key() -> SigningKey {
        SigningKey::from_base64("jubGgkvgopNQeq2NMzDt4EzwENu8EvgU+ed8V59OJOU=").unwrap()
    }

    fn identity() -> Identity {
        Identity {
            subject_id: 1,
            name: "A".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    fn sign_raw(claims: &serde_json::Value, alg: Algorithm, key: &SigningKey) -> String {
        encode(&Header::new(alg), claims, &EncodingKey::from_secret(key.as_bytes())).unwrap()
    }

    fn future_exp() -> i64 {
        (Utc::now() + Duration::hours(1)).timestamp()
    }

    #[test]
    fn test_mint_then_decode_round_trip() {
        let codec = TokenCodec::new(&key());

        let token = codec.mint(identity()).unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.identity(), identity());
        assert_eq!(claims.exp - claims.iat.unwrap(), 24 * 3600);
    }

    #[test]
    fn test_minted_header_declares_hs256() {
        let codec = TokenCodec::new(&key());
        let token = codec.mint(identity()).unwrap();

        let header = jsonwebtoken::decode_header(&token).unwrap();

        assert_eq!(header.alg, Algorithm::HS256);
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_token_from_other_key_has_invalid_signature() {
        let other = SigningKey::from_bytes(b"another-service-key".to_vec()).unwrap();
        let token = TokenCodec::new(&other).mint(identity()).unwrap();

        let result = TokenCodec::new(&key()).decode(&token);

        assert_eq!(result, Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let codec = TokenCodec::new(&key());
        let token = codec
            .mint_at(identity(), Utc::now() - Duration::hours(25))
            .unwrap();

        assert_eq!(codec.decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_custom_lifetime_is_applied() {
        let codec = TokenCodec::with_lifetime(&key(), Duration::minutes(5));
        let token = codec
            .mint_at(identity(), Utc::now() - Duration::minutes(10))
            .unwrap();

        assert_eq!(codec.lifetime(), Duration::minutes(5));
        assert_eq!(codec.decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_other_hmac_algorithm_is_unsupported() {
        let claims = json!({"id": 1, "name": "A", "email": "a@x.com", "exp": future_exp()});
        let token = sign_raw(&claims, Algorithm::HS384, &key());

        let result = TokenCodec::new(&key()).decode(&token);

        assert!(matches!(result, Err(TokenError::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_alg_none_token_is_rejected() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            json!({"id": 1, "name": "A", "email": "a@x.com", "exp": future_exp()})
                .to_string()
                .as_bytes(),
        );
        let token = format!("{}.{}.", header, payload);

        let result = TokenCodec::new(&key()).decode(&token);

        assert!(matches!(
            result,
            Err(TokenError::Malformed(_)) | Err(TokenError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let codec = TokenCodec::new(&key());

        assert!(matches!(codec.decode("not-a-real-token"), Err(TokenError::Malformed(_))));
        assert!(matches!(codec.decode(""), Err(TokenError::Malformed(_))));
        assert!(matches!(codec.decode("a.b.c"), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_signed_token_missing_email_has_malformed_claims() {
        let claims = json!({"id": 1, "name": "A", "exp": future_exp()});
        let token = sign_raw(&claims, Algorithm::HS256, &key());

        let result = TokenCodec::new(&key()).decode(&token);

        assert!(matches!(result, Err(TokenError::MalformedClaims(_))));
    }

    #[test]
    fn test_signed_token_with_string_id_has_malformed_claims() {
        let claims = json!({"id": "1", "name": "A", "email": "a@x.com", "exp": future_exp()});
        let token = sign_raw(&claims, Algorithm::HS256, &key());

        let result = TokenCodec::new(&key()).decode(&token);

        assert!(matches!(result, Err(TokenError::MalformedClaims(_))));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let codec = TokenCodec::new(&key());
        let token = codec.mint(identity()).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let forged_payload = URL_SAFE_NO_PAD.encode(
            json!({"id": 2, "name": "B", "email": "b@x.com", "exp": future_exp()})
                .to_string()
                .as_bytes(),
        );
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert_eq!(codec.decode(&forged), Err(TokenError::InvalidSignature));
    }
}
