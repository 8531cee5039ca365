//! Request pipeline stages.
//!
//! `ApiClient::send` runs these in order around the transport:
//! default headers, credential injection, send, status check.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;

use super::credentials::Credential;
use super::error::ApiError;
use super::transport::{ApiRequest, ApiResponse};

/// Headers every client starts with.
pub fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// `base` plus the Basic token of `credential`, if there is one.
pub fn default_headers_for(base: &HeaderMap, credential: Option<&Credential>) -> HeaderMap {
    let mut headers = base.clone();
    headers.remove(AUTHORIZATION);
    if let Some(value) = credential.and_then(Credential::header_value) {
        headers.insert(AUTHORIZATION, value);
    }
    headers
}

/// Fill in any default header the request does not set itself.
pub fn merge_default_headers(mut request: ApiRequest, defaults: &HeaderMap) -> ApiRequest {
    for (name, value) in defaults {
        if !request.headers.contains_key(name) {
            request.headers.insert(name.clone(), value.clone());
        }
    }
    request
}

/// Inject `Authorization` from the stored credential unless the request
/// already carries one.
pub fn apply_credentials(mut request: ApiRequest, credential: Option<&Credential>) -> ApiRequest {
    let Some(credential) = credential else {
        return request;
    };
    if request.headers.contains_key(AUTHORIZATION) {
        return request;
    }
    match credential.header_value() {
        Some(value) => {
            request.headers.insert(AUTHORIZATION, value);
        }
        None => log::warn!("Stored credential cannot be encoded as a header"),
    }
    request
}

/// Whether the response signals an authentication failure.
pub fn is_auth_failure(response: &ApiResponse) -> bool {
    response.status == StatusCode::UNAUTHORIZED
}

/// Pass 2xx through, turn anything else into `ApiError::Http`.
///
/// 401 is expected to be handled by the caller before this runs.
pub fn check_status(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.status.is_success() {
        return Ok(response);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.text(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_request_headers() {
        let mut request = ApiRequest::get("/user");
        request
            .headers
            .insert(ACCEPT, HeaderValue::from_static("text/plain"));

        let request = merge_default_headers(request, &json_headers());
        assert_eq!(request.headers[ACCEPT], "text/plain");
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_default_headers_follow_credential() {
        let cred = Credential::new("alice", "secret");
        let with = default_headers_for(&json_headers(), Some(&cred));
        assert_eq!(with[AUTHORIZATION], "Basic YWxpY2U6c2VjcmV0");
        assert_eq!(with[ACCEPT], "application/json");

        // A stale token in the base map never outlives the credential.
        let mut base = json_headers();
        base.insert(AUTHORIZATION, HeaderValue::from_static("Basic c3RhbGU6eA=="));
        let without = default_headers_for(&base, None);
        assert!(!without.contains_key(AUTHORIZATION));
        assert_eq!(without[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_apply_credentials_injects_when_missing() {
        let cred = Credential::new("alice", "secret");
        let request = apply_credentials(ApiRequest::get("/checklists"), Some(&cred));
        assert_eq!(request.headers[AUTHORIZATION], "Basic YWxpY2U6c2VjcmV0");
    }

    #[test]
    fn test_apply_credentials_keeps_explicit_header() {
        let cred = Credential::new("alice", "secret");
        let mut request = ApiRequest::get("/checklists");
        request
            .headers
            .insert(AUTHORIZATION, HeaderValue::from_static("Basic Ym9iOmh1bnRlcjI="));

        let request = apply_credentials(request, Some(&cred));
        assert_eq!(request.headers[AUTHORIZATION], "Basic Ym9iOmh1bnRlcjI=");
    }

    #[test]
    fn test_apply_credentials_without_credential() {
        let request = apply_credentials(ApiRequest::get("/checklists"), None);
        assert!(!request.headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn test_check_status() {
        let ok = ApiResponse::new(StatusCode::NO_CONTENT, "");
        assert!(check_status(ok).is_ok());

        let not_found = ApiResponse::new(StatusCode::NOT_FOUND, "Checklist not found");
        match check_status(not_found) {
            Err(ApiError::Http { status, body }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(body, "Checklist not found");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_is_auth_failure() {
        assert!(is_auth_failure(&ApiResponse::new(StatusCode::UNAUTHORIZED, "")));
        assert!(!is_auth_failure(&ApiResponse::new(StatusCode::FORBIDDEN, "")));
    }
}
