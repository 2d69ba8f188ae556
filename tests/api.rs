use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use sea_orm::ConnectOptions;
use serde_json::{Value, json};
use tower::ServiceExt;

use cinelog::{AppState, db, router, store::Store};

async fn app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = db::connect_and_migrate(options).await.expect("in-memory database");
    router(Arc::new(AppState { store: Store::new(db) }))
}

fn basic(login: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{login}:{password}")))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    auth: Option<(&str, &str)>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((login, password)) = auth {
        builder = builder.header(header::AUTHORIZATION, basic(login, password));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value =
        if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

const ALICE: Option<(&str, &str)> = Some(("alice", "topsecret"));

async fn app_with_alice() -> Router {
    let app = app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({ "login": "alice", "password": "topsecret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    app
}

#[tokio::test]
async fn register_and_authenticate() {
    let app = app_with_alice().await;

    // listing is gated behind basic auth
    let request = Request::builder().uri("/films").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Basic");

    let (status, _) = send(&app, "GET", "/films", Some(("alice", "wrong")), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, "GET", "/films", ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn duplicate_user_is_bad_request() {
    let app = app_with_alice().await;

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({ "login": "alice", "password": "other" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn film_creation_listing_and_filters() {
    let app = app_with_alice().await;

    for (name, year) in [
        ("test_film", 2019),
        ("testie__film2", 2019),
        ("t_est_film3", 2016),
        ("te__st_film4", 2012),
        ("telsfilm5", 2022),
    ] {
        let (status, _) = send(
            &app,
            "POST",
            "/films",
            ALICE,
            Some(json!({ "name": name, "release_year": year })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, "POST", "/films", ALICE, Some(json!({ "name": "test_film" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("already exists"));

    let (_, body) = send(&app, "GET", "/films?skip=1&limit=2", ALICE, None).await;
    assert_eq!(body, json!([
        { "name": "testie__film2", "release_year": 2019 },
        { "name": "t_est_film3", "release_year": 2016 },
    ]));

    let (_, body) = send(&app, "GET", "/films/filter/substring/est", ALICE, None).await;
    let found: Vec<&str> = body.as_array().unwrap().iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert_eq!(found, ["test_film", "testie__film2", "t_est_film3"]);

    let (_, body) = send(&app, "GET", "/films/filter/release_year/2019", ALICE, None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&app, "GET", "/films?skip=99", ALICE, None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn review_creation_and_lookup() {
    let app = app_with_alice().await;
    send(&app, "POST", "/films", ALICE, Some(json!({ "name": "alien", "release_year": 1979 })))
        .await;

    let (status, body) = send(
        &app,
        "POST",
        "/users/me/reviews",
        ALICE,
        Some(json!({ "film_name": "alien", "text": "good stuff", "mark": 8 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({
        "login": "alice",
        "film_name": "alien",
        "text": "good stuff",
        "mark": 8,
    }));

    // duplicate pair, out-of-range mark, unknown film: all client errors
    let (status, _) = send(
        &app,
        "POST",
        "/users/me/reviews",
        ALICE,
        Some(json!({ "film_name": "alien", "mark": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/users/me/reviews",
        ALICE,
        Some(json!({ "film_name": "alien", "mark": 11 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("between 0 and 10"));

    let (status, _) = send(
        &app,
        "POST",
        "/users/me/reviews",
        ALICE,
        Some(json!({ "film_name": "ghost", "mark": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/users/me/reviews/alien", ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mark"], 8);

    // unknown film errors on the single lookup, but not on the film listing
    let (status, _) = send(&app, "GET", "/users/me/reviews/ghost", ALICE, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) = send(&app, "GET", "/films/ghost/reviews", ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (_, body) = send(&app, "GET", "/users/me/reviews", ALICE, None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn extended_info_over_http() {
    let app = app_with_alice().await;
    for login in ["bob", "carol"] {
        send(&app, "POST", "/users", None, Some(json!({ "login": login, "password": "pw" })))
            .await;
    }
    send(&app, "POST", "/films", ALICE, Some(json!({ "name": "alien" }))).await;

    for (auth, mark, text) in [
        (ALICE, 7, Some("tense")),
        (Some(("bob", "pw")), 8, None),
        (Some(("carol", "pw")), 9, Some("a classic")),
    ] {
        let (status, _) = send(
            &app,
            "POST",
            "/users/me/reviews",
            auth,
            Some(json!({ "film_name": "alien", "mark": mark, "text": text })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, "GET", "/films/alien/extended?limit=2", ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "alien");
    assert_eq!(body["number_of_marks"], 3);
    assert_eq!(body["number_of_reviews"], 2);
    assert_eq!(body["average_mark"], 8.0);
    assert_eq!(body["reviews"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, "GET", "/films/ghost/extended", ALICE, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn average_filter_ranks_and_excludes_unreviewed() {
    let app = app_with_alice().await;
    send(&app, "POST", "/users", None, Some(json!({ "login": "bob", "password": "pw" }))).await;
    for name in ["alpha", "beta", "unseen"] {
        send(&app, "POST", "/films", ALICE, Some(json!({ "name": name }))).await;
    }

    for (auth, film, mark) in [
        (ALICE, "alpha", 4),
        (Some(("bob", "pw")), "alpha", 6),
        (ALICE, "beta", 9),
    ] {
        send(
            &app,
            "POST",
            "/users/me/reviews",
            auth,
            Some(json!({ "film_name": film, "mark": mark })),
        )
        .await;
    }

    let (status, body) = send(&app, "GET", "/films/filter/average", ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    let ranked: Vec<&str> =
        body.as_array().unwrap().iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert_eq!(ranked, ["beta", "alpha"]);
}
