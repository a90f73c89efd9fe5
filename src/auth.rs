use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode as HttpStatusCode;

const HDR_PROFILE_ID: &str = "x-auth-profile-id";
const HDR_LOGIN_NAME: &str = "x-auth-login-name";
const HDR_FORWARDED_FOR: &str = "x-forwarded-for";

/// identity of the request, verified and injected as headers by the
/// upstream gateway, this service never validates credentials itself
#[derive(Debug, Clone)]
pub struct AppAuthedClaim {
    pub profile: u32,
    pub login_name: Option<String>,
    pub client_addr: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for AppAuthedClaim
where
    S: Send + Sync,
{
    type Rejection = (HttpStatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let profile = parts
            .headers
            .get(HDR_PROFILE_ID)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or((
                HttpStatusCode::UNAUTHORIZED,
                r#"{"reason":"missing-auth-header"}"#,
            ))?;
        let login_name = parts
            .headers
            .get(HDR_LOGIN_NAME)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let client_addr = parts
            .headers
            .get(HDR_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        Ok(Self {
            profile,
            login_name,
            client_addr,
        })
    }
} // end of impl FromRequestParts for AppAuthedClaim
