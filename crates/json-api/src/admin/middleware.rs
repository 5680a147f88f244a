//! Admin bearer token middleware.

use salvo::{http::header::AUTHORIZATION, prelude::*};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let Ok(state) = depot.state_or_500() else {
        res.render(StatusError::internal_server_error());

        return;
    };

    let Some(expected) = state.admin_token_sha256.as_deref() else {
        warn!("admin request rejected, no admin token is configured");

        res.render(StatusError::unauthorized().brief("Admin access is disabled"));

        return;
    };

    if !token_matches(token, expected) {
        res.render(StatusError::unauthorized().brief("Invalid admin token"));

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

fn token_matches(token: &str, expected_sha256: &str) -> bool {
    hash_token(token).eq_ignore_ascii_case(expected_sha256.trim())
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::strict_state;

    use super::*;

    #[salvo::handler]
    async fn admitted(res: &mut Response) {
        res.render("admitted");
    }

    fn make_service(admin_token_sha256: Option<String>) -> Service {
        let mut state = strict_state();
        state.admin_token_sha256 = admin_token_sha256;

        Service::new(
            Router::new()
                .hoop(inject(Arc::new(state)))
                .hoop(handler)
                .push(Router::new().get(admitted)),
        )
    }

    #[test]
    fn hash_is_lowercase_hex_sha256() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() {
        let res = TestClient::get("http://example.com")
            .send(&make_service(Some(hash_token("secret"))))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() {
        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic secret", true)
            .send(&make_service(Some(hash_token("secret"))))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_wrong_token_returns_401() {
        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer guess", true)
            .send(&make_service(Some(hash_token("secret"))))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_unconfigured_admin_token_rejects_everything() {
        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer secret", true)
            .send(&make_service(None))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_valid_token_is_admitted() -> TestResult {
        let expected = hash_token("secret").to_uppercase();

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer secret", true)
            .send(&make_service(Some(expected)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "admitted");

        Ok(())
    }
}
