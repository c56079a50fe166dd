use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use serde_json::Value;

use signup::{Activity, Catalog, Router, Server, routes, seed};

async fn send(app: &Router, method: http::Method, uri: &str) -> (u16, Value) {
    let req = http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Empty::<Bytes>::new())
        .unwrap();
    let res = app.handle(req).await;
    let status = res.status().as_u16();
    let body = res.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    (status, json)
}

async fn seeded() -> (Catalog, Router) {
    let catalog = seed::load(None).await.unwrap();
    (catalog.clone(), routes::router(catalog, None))
}

fn chess_club() -> (Catalog, Router) {
    let catalog = Catalog::new([(
        "Chess Club".to_owned(),
        Activity::new("Learn strategies and compete in chess tournaments", "Fridays", 10),
    )])
    .unwrap();
    (catalog.clone(), routes::router(catalog, None))
}

#[tokio::test]
async fn root_welcomes() {
    let (_, app) = seeded().await;
    let (status, body) = send(&app, http::Method::GET, "/").await;
    assert_eq!(status, 200);
    assert!(body["message"].as_str().unwrap().contains("Welcome"));
}

#[tokio::test]
async fn every_activity_has_a_description() {
    let (_, app) = seeded().await;
    let (status, body) = send(&app, http::Method::GET, "/activities").await;
    assert_eq!(status, 200);
    let activities = body.as_object().unwrap();
    assert!(!activities.is_empty());
    for details in activities.values() {
        assert!(details.get("description").is_some());
        assert!(details["participants"].is_array());
    }
}

#[tokio::test]
async fn signup_then_duplicate() {
    let (_, app) = chess_club();

    let (status, body) = send(&app, http::Method::POST, "/activities/Chess%20Club/signup?email=a@b.com").await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Signed up a@b.com for Chess Club");

    let (_, activities) = send(&app, http::Method::GET, "/activities").await;
    assert_eq!(activities["Chess Club"]["participants"], serde_json::json!(["a@b.com"]));

    let (status, body) = send(&app, http::Method::POST, "/activities/Chess%20Club/signup?email=a@b.com").await;
    assert_eq!(status, 400);
    assert!(body["detail"].as_str().unwrap().contains("already signed up"));
}

#[tokio::test]
async fn encoded_email_is_decoded() {
    let (catalog, app) = chess_club();
    let (status, _) = send(&app, http::Method::POST, "/activities/Chess%20Club/signup?email=a%40b.com").await;
    assert_eq!(status, 200);
    assert!(catalog.get("Chess Club").await.unwrap().is_registered("a@b.com"));
}

#[tokio::test]
async fn unknown_activity_is_404() {
    let (_, app) = seeded().await;
    let (status, body) = send(&app, http::Method::POST, "/activities/NonexistentActivity/signup?email=foo@bar.com").await;
    assert_eq!(status, 404);
    assert!(body["detail"].as_str().unwrap().to_lowercase().contains("not found"));

    let (status, _) = send(&app, http::Method::DELETE, "/activities/NonexistentActivity/signup?email=foo@bar.com").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn full_activity_refuses_signup() {
    let (catalog, app) = seeded().await;
    catalog.set_capacity("Chess Club", 0).await.unwrap();

    let (status, body) = send(&app, http::Method::POST, "/activities/Chess%20Club/signup?email=fulltest@example.com").await;
    assert_eq!(status, 400);
    assert!(body["detail"].as_str().unwrap().to_lowercase().contains("full"));
}

#[tokio::test]
async fn unregister_then_unregister_again() {
    let (_, app) = seeded().await;
    let uri = "/activities/Chess%20Club/signup?email=unregtest@example.com";

    assert_eq!(send(&app, http::Method::POST, uri).await.0, 200);

    let (status, body) = send(&app, http::Method::DELETE, uri).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Unregistered unregtest@example.com from Chess Club");

    let (status, body) = send(&app, http::Method::DELETE, uri).await;
    assert_eq!(status, 400);
    assert!(body["detail"].as_str().unwrap().contains("not signed up"));
}

#[tokio::test]
async fn missing_email_is_422() {
    let (_, app) = chess_club();
    assert_eq!(send(&app, http::Method::POST, "/activities/Chess%20Club/signup").await.0, 422);
    assert_eq!(send(&app, http::Method::POST, "/activities/Chess%20Club/signup?email=").await.0, 422);
}

#[tokio::test]
async fn wrong_method_and_unknown_path() {
    let (_, app) = chess_club();
    let (status, body) = send(&app, http::Method::PUT, "/activities").await;
    assert_eq!(status, 405);
    assert_eq!(body["detail"], "Method Not Allowed");

    let (status, body) = send(&app, http::Method::GET, "/nowhere").await;
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "Not Found");
}

#[tokio::test]
async fn probes() {
    let (_, app) = chess_club();
    assert_eq!(send(&app, http::Method::GET, "/healthz").await, (200, Value::String("ok".into())));
    assert_eq!(send(&app, http::Method::GET, "/readyz").await, (200, Value::String("ready".into())));

    let bare = Router::new().on(signup::Method::Get, "/readyz", signup::health::readiness);
    assert_eq!(send(&bare, http::Method::GET, "/readyz").await.0, 503);
}

#[tokio::test]
async fn handlers_without_catalog_fail_with_500() {
    let bare = Router::new().on(signup::Method::Get, "/activities", routes::list_activities);
    assert_eq!(send(&bare, http::Method::GET, "/activities").await.0, 500);
}

#[tokio::test]
async fn static_files_are_served_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log('hi');").unwrap();

    let catalog = seed::load(None).await.unwrap();
    let app = routes::router(catalog, Some(dir.path().to_owned()));

    let req = http::Request::builder()
        .uri("/static/app.js")
        .body(Empty::<Bytes>::new())
        .unwrap();
    let res = app.handle(req).await;
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.headers()["content-type"], "text/javascript; charset=utf-8");
    let body = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"console.log('hi');");

    assert_eq!(send(&app, http::Method::GET, "/static/missing.css").await.0, 404);
    assert_eq!(send(&app, http::Method::GET, "/static/%2e%2e/secret").await.0, 404);
}

#[tokio::test]
async fn shipped_front_end_is_served() {
    let catalog = seed::load(None).await.unwrap();
    let dir = std::path::PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static"));
    let app = routes::router(catalog, Some(dir));

    for (path, content_type) in [
        ("/static/index.html", "text/html; charset=utf-8"),
        ("/static/app.js",     "text/javascript; charset=utf-8"),
        ("/static/styles.css", "text/css; charset=utf-8"),
    ] {
        let req = http::Request::builder().uri(path).body(Empty::<Bytes>::new()).unwrap();
        let res = app.handle(req).await;
        assert_eq!(res.status().as_u16(), 200, "{path}");
        assert_eq!(res.headers()["content-type"], content_type, "{path}");
    }
}

#[tokio::test]
async fn static_mount_is_absent_by_default() {
    let (_, app) = seeded().await;
    assert_eq!(send(&app, http::Method::GET, "/static/app.js").await.0, 404);
}

#[tokio::test]
async fn server_returns_after_shutdown() {
    let (_, app) = chess_club();
    let server = Server::bind(([127, 0, 0, 1], 0).into());
    server.serve_with_shutdown(app, async {}).await.unwrap();
}
