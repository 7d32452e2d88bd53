//! End-to-end tests — the site served over HTTP, driven with full-page,
//! HTMX and boosted requests.

use std::sync::Arc;

use axum::Extension;
use hxpage::pages::site_router;
use hxpage_core::{AuthUser, Config, CsrfToken};
use hxpage_transport::PageServer;

fn test_config() -> Arc<Config> {
    let mut config = Config::default();
    config.app.name = "Site Test".into();
    config.http.port = 0;
    Arc::new(config)
}

/// Start the site on a random port. The server is leaked for the test's duration.
async fn start_site() -> u16 {
    let server = PageServer::start(test_config(), site_router()).await.unwrap();
    let port = server.port();
    Box::leak(Box::new(server));
    port
}

/// Start the site with a signed-in user and CSRF token on every request.
async fn start_site_as(user: AuthUser) -> u16 {
    let (router, routes) = site_router().into_parts();
    let router = router
        .layer(Extension(user))
        .layer(Extension(CsrfToken::new("csrf-test-token")));

    let server = PageServer::start_with_routes(test_config(), router, routes).await.unwrap();
    let port = server.port();
    Box::leak(Box::new(server));
    port
}

async fn get(port: u16, path: &str, headers: &[(&str, &str)]) -> (u16, String) {
    let client = reqwest::Client::new();
    let mut request = client.get(format!("http://127.0.0.1:{port}{path}"));
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    let response = request.send().await.unwrap();
    let status = response.status().as_u16();
    (status, response.text().await.unwrap())
}

#[tokio::test]
async fn full_page_has_layout() {
    let port = start_site().await;
    let (status, body) = get(port, "/", &[]).await;

    assert_eq!(status, 200);
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("<title>Home | Site Test</title>"));
    assert!(body.contains(r#"<meta name="keywords" content="home, htmx">"#));
    assert!(body.contains("<h1>Welcome</h1>"));
    assert!(body.contains("Guest"));
}

#[tokio::test]
async fn htmx_request_gets_fragment_only() {
    let port = start_site().await;
    let (status, body) = get(port, "/about", &[("HX-Request", "true"), ("HX-Target", "main")]).await;

    assert_eq!(status, 200);
    assert!(body.starts_with("<h1>About</h1>"));
    assert!(!body.contains("<html"));
}

#[tokio::test]
async fn boosted_request_gets_full_page() {
    let port = start_site().await;
    let (_, body) = get(port, "/about", &[("HX-Request", "true"), ("HX-Boosted", "true")]).await;

    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("<h1>About</h1>"));
}

#[tokio::test]
async fn nav_marks_active_page() {
    let port = start_site().await;

    let (_, body) = get(port, "/about", &[]).await;
    assert!(body.contains(r#"<a href="/about" class="active">About</a>"#));
    assert!(body.contains(r#"<a href="/">Home</a>"#));

    let (_, body) = get(port, "/", &[]).await;
    assert!(body.contains(r#"<a href="/" class="active">Home</a>"#));
}

#[tokio::test]
async fn reversed_links_in_pages() {
    let port = start_site().await;

    let (_, home) = get(port, "/", &[]).await;
    assert!(home.contains(r##"hx-get="/about" hx-target="#main""##));

    let (status, user) = get(port, "/users/42", &[("HX-Request", "true")]).await;
    assert_eq!(status, 200);
    assert!(user.contains("<h1>User 42</h1>"));
    assert!(user.contains(r#"<a href="/">Back home</a>"#));
}

#[tokio::test]
async fn signed_in_user_and_csrf_reach_templates() {
    let port = start_site_as(AuthUser::new(5, "Ada", "ada@example.com")).await;
    let (_, body) = get(port, "/", &[]).await;

    assert!(body.contains("<h1>Welcome, Ada</h1>"));
    assert!(body.contains(r#"<span class="user">Ada</span>"#));
    assert!(body.contains(r#"value="csrf-test-token""#));
}

#[tokio::test]
async fn admin_user_is_labelled() {
    let port = start_site_as(AuthUser::new(1, "Root", "root@example.com").with_admin(true)).await;
    let (_, body) = get(port, "/about", &[]).await;

    assert!(body.contains("Root (admin)"));
}

#[tokio::test]
async fn unknown_path_is_404() {
    let port = start_site().await;
    let (status, _) = get(port, "/nope", &[]).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn health_endpoint() {
    let port = start_site().await;
    let body: serde_json::Value = reqwest::get(format!("http://127.0.0.1:{port}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["app"], "Site Test");
}
