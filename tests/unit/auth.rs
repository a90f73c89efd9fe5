use axum::extract::FromRequestParts;
use axum::http::{Request, StatusCode};

use warehouse::AppAuthedClaim;

#[tokio::test]
async fn claim_extract_ok() {
    let req = Request::builder()
        .uri("/inventory")
        .header("x-auth-profile-id", "188")
        .header("x-auth-login-name", "shelf-keeper-01")
        .header("x-forwarded-for", "203.0.113.7")
        .body(())
        .unwrap();
    let (mut parts, _body) = req.into_parts();
    let result = AppAuthedClaim::from_request_parts(&mut parts, &()).await;
    assert!(result.is_ok());
    let claim = result.unwrap();
    assert_eq!(claim.profile, 188);
    assert_eq!(claim.login_name.as_deref(), Some("shelf-keeper-01"));
    assert_eq!(claim.client_addr.as_deref(), Some("203.0.113.7"));
}

#[tokio::test]
async fn claim_missing_profile_header() {
    let req = Request::builder()
        .uri("/inventory")
        .header("x-auth-login-name", "shelf-keeper-01")
        .body(())
        .unwrap();
    let (mut parts, _body) = req.into_parts();
    let result = AppAuthedClaim::from_request_parts(&mut parts, &()).await;
    assert!(result.is_err());
    if let Err((status, _detail)) = result {
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn claim_malformed_profile_header() {
    let req = Request::builder()
        .uri("/inventory")
        .header("x-auth-profile-id", "not-a-number")
        .body(())
        .unwrap();
    let (mut parts, _body) = req.into_parts();
    let result = AppAuthedClaim::from_request_parts(&mut parts, &()).await;
    assert!(result.is_err());
}
