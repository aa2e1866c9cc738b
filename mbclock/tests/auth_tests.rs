use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mbclock::config::{
    Configuration, MoneybirdConfiguration, OAuthConfiguration, ServerConfiguration,
};
use mbclock::{app, AppState};

const ADMINISTRATION_ID: &str = "123456789";

fn configuration(api_server: Option<&MockServer>, oauth: Option<OAuthConfiguration>) -> Configuration {
    Configuration {
        server: ServerConfiguration {
            secure_cookies: false,
            ..ServerConfiguration::default()
        },
        moneybird: MoneybirdConfiguration {
            administration_id: ADMINISTRATION_ID.to_string(),
            api_base_url: api_server
                .map(|s| s.uri())
                .unwrap_or_else(|| "https://moneybird.example/api/v2".to_string()),
            service_token: None,
            scopes: vec!["time_entries".to_string()],
        },
        oauth,
    }
}

fn static_oauth(token_server: &MockServer) -> OAuthConfiguration {
    OAuthConfiguration {
        client_id: "client-1".to_string(),
        client_secret: "s3cret".to_string(),
        redirect_uri: "https://clock.example.com/auth/callback".to_string(),
        auth_url: format!("{}/oauth/authorize", token_server.uri()),
        token_url: format!("{}/oauth/token", token_server.uri()),
    }
}

fn set_cookies(response: &axum::response::Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn callback_without_code_is_a_client_error() {
    let token_server = MockServer::start().await;
    let state = AppState::new(configuration(None, Some(static_oauth(&token_server))));

    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/auth/callback")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn callback_exchanges_the_code_and_establishes_a_session() {
    let token_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=abc123"))
        .and(body_string_contains("client_id=client-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "issued-token",
            "token_type": "bearer",
        })))
        .expect(1)
        .mount(&token_server)
        .await;

    let state = AppState::new(configuration(None, Some(static_oauth(&token_server))));

    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/auth/callback?code=abc123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://clock.example.com/"
    );

    let cookies = set_cookies(&response);
    let token_cookie = cookies
        .iter()
        .find(|c| c.starts_with("moneybird_token="))
        .expect("token cookie set");
    assert!(token_cookie.contains("moneybird_token=issued-token"));
    assert!(token_cookie.contains("HttpOnly"));
    assert!(token_cookie.contains("SameSite=Lax"));
}

#[tokio::test]
async fn callback_prefers_the_forwarded_host() {
    let token_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "issued-token",
            "token_type": "bearer",
        })))
        .mount(&token_server)
        .await;

    let state = AppState::new(configuration(None, Some(static_oauth(&token_server))));

    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/auth/callback?code=abc123")
                .header("x-forwarded-host", "proxy.example.net")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://proxy.example.net/"
    );
}

#[tokio::test]
async fn callback_surfaces_the_upstream_exchange_failure() {
    let token_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
        })))
        .mount(&token_server)
        .await;

    let state = AppState::new(configuration(None, Some(static_oauth(&token_server))));

    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/auth/callback?code=expired")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("Token request failed"));
}

#[tokio::test]
async fn callback_with_a_vendor_error_is_a_gateway_error() {
    let token_server = MockServer::start().await;
    let state = AppState::new(configuration(None, Some(static_oauth(&token_server))));

    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/auth/callback?error=access_denied")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "access_denied");
}

#[tokio::test]
async fn callback_without_any_credentials_is_a_server_error() {
    let state = AppState::new(configuration(None, None));

    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/auth/callback?code=abc123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn login_redirects_to_the_authorize_endpoint() {
    let token_server = MockServer::start().await;
    let state = AppState::new(configuration(None, Some(static_oauth(&token_server))));

    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/auth/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.contains("/oauth/authorize?"));
    assert!(location.contains("client_id=client-1"));
    assert!(location.contains("response_type=code"));
    assert!(location.contains("scope=time_entries"));
}

#[tokio::test]
async fn login_without_credentials_is_a_server_error() {
    let state = AppState::new(configuration(None, None));

    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/auth/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn credentials_form_sets_the_pending_cookie_and_redirects() {
    let state = AppState::new(configuration(None, None));

    let form = "client_id=client-9&client_secret=sssh&redirect_uri=https%3A%2F%2Fclock.example.com%2Fauth%2Fcallback";
    let response = app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/credentials")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.starts_with("https://moneybird.com/oauth/authorize?"));
    assert!(location.contains("client_id=client-9"));

    let cookies = set_cookies(&response);
    let pending = cookies
        .iter()
        .find(|c| c.starts_with("moneybird_oauth_config="))
        .expect("pending cookie set");
    assert!(pending.contains("Max-Age=600"));
    assert!(pending.contains("HttpOnly"));
}

#[tokio::test]
async fn credentials_form_rejects_blank_fields() {
    let state = AppState::new(configuration(None, None));

    let form = "client_id=&client_secret=sssh&redirect_uri=https%3A%2F%2Fclock.example.com";
    let response = app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/credentials")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn manual_token_is_trimmed_and_stored() {
    let state = AppState::new(configuration(None, None));

    let response = app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/token")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("token=%20personal-token%20"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

    let cookies = set_cookies(&response);
    let token_cookie = cookies
        .iter()
        .find(|c| c.starts_with("moneybird_token="))
        .expect("token cookie set");
    assert!(token_cookie.contains("moneybird_token=personal-token"));
}

#[tokio::test]
async fn empty_manual_token_is_rejected() {
    let state = AppState::new(configuration(None, None));

    let response = app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/token")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("token=%20%20"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let state = AppState::new(configuration(None, None));

    let response = app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .header(header::COOKIE, "moneybird_token=tok-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookies = set_cookies(&response);
    let removal = cookies
        .iter()
        .find(|c| c.starts_with("moneybird_token="))
        .expect("removal cookie set");
    assert!(removal.contains("Max-Age=0"));
}

#[tokio::test]
async fn api_data_without_a_session_is_unauthorized() {
    let state = AppState::new(configuration(None, None));

    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/api/data")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn api_data_reports_an_error_with_empty_lists_on_partial_failure() {
    let api_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{}/users.json", ADMINISTRATION_ID)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": "42", "name": "Sam"}])),
        )
        .mount(&api_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/{}/projects.json", ADMINISTRATION_ID)))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&api_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/{}/contacts.json", ADMINISTRATION_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&api_server)
        .await;

    let state = AppState::new(configuration(Some(&api_server), None));

    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/api/data")
                .header(header::COOKIE, "moneybird_token=tok-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    // No partially-populated data: one failed list empties them all
    assert_eq!(body["users"], json!([]));
    assert_eq!(body["projects"], json!([]));
    assert_eq!(body["contacts"], json!([]));
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn routes_nest_under_the_configured_base_path() {
    let mut config = configuration(None, None);
    config.server.base_path = Some("/TheodenClient/Clock".to_string());
    let state = AppState::new(config);

    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/TheodenClient/Clock/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
