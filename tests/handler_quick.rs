mod common;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_quick_create_redirects_to_landing() {
    let (server, repo, _storage) = common::create_test_server();

    let response = server
        .get("/api/quick")
        .add_query_param("title", "Bolo de Chocolate")
        .add_query_param("price", "39.9")
        .add_query_param("whatsapp", "5511999999999")
        .await;

    assert_eq!(response.status_code(), 302);

    let location = response.header("location");
    let location = location.to_str().unwrap();
    assert!(location.starts_with("/a/bolo-de-chocolate-"));

    let ads = repo.all();
    assert_eq!(ads.len(), 1);
    let ad = &ads[0];
    assert_eq!(location, format!("/a/{}", ad.slug));
    assert_eq!(ad.price, Decimal::new(3990, 2));
    assert_eq!(ad.image_url.as_deref(), Some("/static/og-fallback.png"));
    assert!(ad.published);

    let expires_at = ad.expires_at.unwrap();
    let expected = Utc::now() + Duration::hours(24);
    assert!((expires_at - expected).num_seconds().abs() < 10);
}

#[tokio::test]
async fn test_quick_create_round_trip() {
    let (server, _repo, _storage) = common::create_test_server();

    let response = server
        .get("/api/quick")
        .add_query_param("title", "Bolo de Chocolate")
        .add_query_param("price", "39.9")
        .add_query_param("whatsapp", "5511999999999")
        .add_query_param("desc", "Feito hoje")
        .await;
    let location = response.header("location").to_str().unwrap().to_string();

    let page = server.get(&location).await;

    assert_eq!(page.status_code(), 200);
    let html = page.text();
    assert!(html.contains("R$ 39,90"));
    assert!(html.contains("%22Bolo%20de%20Chocolate%22%20por%20R%24%2039%2C90"));
    assert!(html.contains("https://popx.test/static/og-fallback.png"));
}

#[tokio::test]
async fn test_quick_create_relative_expiration() {
    let (server, repo, _storage) = common::create_test_server();

    let response = server
        .get("/api/quick")
        .add_query_param("title", "Bolo")
        .add_query_param("price", "10")
        .add_query_param("whatsapp", "5511999999999")
        .add_query_param("expires", "48h")
        .await;

    assert_eq!(response.status_code(), 302);

    let expires_at = repo.all()[0].expires_at.unwrap();
    let expected = Utc::now() + Duration::hours(48);
    assert!((expires_at - expected).num_seconds().abs() < 10);
}

#[tokio::test]
async fn test_quick_create_explicit_expiration_and_image() {
    let (server, repo, _storage) = common::create_test_server();

    let response = server
        .get("/api/quick")
        .add_query_param("title", "Bolo")
        .add_query_param("price", "10,50")
        .add_query_param("whatsapp", "+55 11 99999-9999")
        .add_query_param("expires", "2099-08-31T23:59:00Z")
        .add_query_param("image_url", "https://cdn.example.com/bolo.png")
        .await;

    assert_eq!(response.status_code(), 302);

    let ad = &repo.all()[0];
    assert_eq!(ad.whatsapp, "5511999999999");
    assert_eq!(ad.price, Decimal::new(1050, 2));
    assert_eq!(ad.image_url.as_deref(), Some("https://cdn.example.com/bolo.png"));
    assert_eq!(
        ad.expires_at.unwrap().to_rfc3339(),
        "2099-08-31T23:59:00+00:00"
    );
}

#[tokio::test]
async fn test_quick_create_missing_fields() {
    let (server, repo, _storage) = common::create_test_server();

    for (title, price, whatsapp) in [
        ("", "39.9", "5511999999999"),
        ("Bolo", "", "5511999999999"),
        ("Bolo", "39.9", ""),
    ] {
        let response = server
            .get("/api/quick")
            .add_query_param("title", title)
            .add_query_param("price", price)
            .add_query_param("whatsapp", whatsapp)
            .await;

        assert_eq!(response.status_code(), 400);

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "Missing required params");
    }

    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_quick_create_invalid_price() {
    let (server, repo, _storage) = common::create_test_server();

    let response = server
        .get("/api/quick")
        .add_query_param("title", "Bolo")
        .add_query_param("price", "caro")
        .add_query_param("whatsapp", "5511999999999")
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<serde_json::Value>()["ok"], false);
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_quick_create_bad_expiration_is_server_error() {
    let (server, repo, _storage) = common::create_test_server();

    let response = server
        .get("/api/quick")
        .add_query_param("title", "Bolo")
        .add_query_param("price", "10")
        .add_query_param("whatsapp", "5511999999999")
        .add_query_param("expires", "amanhã")
        .await;

    assert_eq!(response.status_code(), 500);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["ok"], false);
    assert_eq!(json["code"], "parse_error");
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_quick_create_store_failure() {
    let (server, repo, _storage) = common::create_test_server();
    repo.fail.store(true, Ordering::SeqCst);

    let response = server
        .get("/api/quick")
        .add_query_param("title", "Bolo")
        .add_query_param("price", "10")
        .add_query_param("whatsapp", "5511999999999")
        .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(response.json::<serde_json::Value>()["code"], "upstream_error");
}
