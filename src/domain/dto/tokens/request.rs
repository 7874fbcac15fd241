use serde::Deserialize;

/// 토큰 검증 요청 메시지
///
/// 요청 토픽의 페이로드 `{"token": "<string>"}` 에 대응합니다.
/// `token` 이외의 필드는 무시합니다.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerificationRequest {
    pub token: String,
}

impl VerificationRequest {
    /// 메시지 페이로드를 파싱합니다.
    pub fn from_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_fields_are_ignored() {
        let request = VerificationRequest::from_slice(
            br#"{"token": "abc", "user_id": 99, "valid": true}"#,
        )
        .unwrap();

        assert_eq!(request.token, "abc");
    }

    #[test]
    fn test_missing_token_is_rejected() {
        assert!(VerificationRequest::from_slice(br#"{}"#).is_err());
        assert!(VerificationRequest::from_slice(br#"{"token": 12}"#).is_err());
        assert!(VerificationRequest::from_slice(b"not json").is_err());
    }
}
