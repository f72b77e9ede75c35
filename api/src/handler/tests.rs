//! End-to-end handler tests over the in-memory store: real router, real
//! session middleware, no database.

use crate::route;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use kernel::repository::{
    memory::{MemoryStore, RecordingMailQueue},
    reservation::ReservationRepository,
};
use registry::AppRegistry;
use std::sync::Arc;
use tower::ServiceExt;

struct Harness {
    app: Router,
    store: Arc<MemoryStore>,
    mail: Arc<RecordingMailQueue>,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    let mail = Arc::new(RecordingMailQueue::new());
    let registry = AppRegistry::from_parts(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        mail.clone(),
        "owner@fort-smythe.test".into(),
    );
    Harness {
        app: route::app(registry),
        store,
        mail,
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request build failed")
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("request build failed")
}

fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request build failed")
}

/// Pulls the `sid=...` pair out of a Set-Cookie header.
fn session_cookie(res: &axum::response::Response) -> String {
    let raw = res
        .headers()
        .get(header::SET_COOKIE)
        .expect("no session cookie set")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

async fn body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(res: &axum::response::Response) -> &str {
    res.headers()
        .get(header::LOCATION)
        .expect("no redirect location")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn home_page_renders_and_mints_a_session_cookie() {
    let h = harness();
    let res = h.app.oneshot(get("/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(session_cookie(&res).starts_with("sid="));
}

#[tokio::test]
async fn availability_json_reports_a_free_room() {
    let h = harness();
    let room = h.store.add_room("Generals Quarters");

    let res = h
        .app
        .oneshot(post_form(
            "/search-availability-json",
            None,
            &format!("room_id={room}&start_date=2024-07-01&end_date=2024-07-03"),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["room_id"], room.to_string());
    assert_eq!(body["start_date"], "2024-07-01");
    assert_eq!(body["end_date"], "2024-07-03");
}

#[tokio::test]
async fn availability_json_answers_ok_false_on_a_bad_room_id() {
    let h = harness();
    let res = h
        .app
        .oneshot(post_form(
            "/search-availability-json",
            None,
            "room_id=invalid&start_date=2024-07-01&end_date=2024-07-03",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "error during parsing room_id");
}

#[tokio::test]
async fn booking_flow_persists_the_reservation_and_sends_two_mails() {
    let h = harness();
    let room = h.store.add_room("Generals Quarters");

    // search: lists the free room and parks the span in the session
    let res = h
        .app
        .clone()
        .oneshot(post_form(
            "/search-availability",
            None,
            "start_date=2024-08-01&end_date=2024-08-04",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res);
    let listing = body_string(res).await;
    assert!(listing.contains(&format!("/choose-room/{room}")));
    assert!(listing.contains("Generals Quarters"));

    // choose the room
    let res = h
        .app
        .clone()
        .oneshot(get_with_cookie(
            &format!("/choose-room/{room}"),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/make-reservation");

    // submit guest details
    let res = h
        .app
        .clone()
        .oneshot(post_form(
            "/make-reservation",
            Some(&cookie),
            "first_name=John&last_name=Smith&email=john%40here.com&phone=555-555-5555",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/reservation-summary");

    let reservations = h.store.find_all().await.unwrap();
    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0].first_name, "John");
    assert_eq!(reservations[0].room.room_id, room);
    assert!(!reservations[0].processed);

    let sent = h.mail.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "john@here.com");
    assert_eq!(sent[1].to, "owner@fort-smythe.test");

    // the summary renders once, then the draft is gone
    let res = h
        .app
        .clone()
        .oneshot(get_with_cookie("/reservation-summary", &cookie))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let summary = body_string(res).await;
    assert!(summary.contains("John Smith"));

    let res = h
        .app
        .oneshot(get_with_cookie("/reservation-summary", &cookie))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
}

#[tokio::test]
async fn search_with_no_availability_redirects_back_with_a_flash() {
    let h = harness();
    // no rooms seeded at all
    let res = h
        .app
        .clone()
        .oneshot(post_form(
            "/search-availability",
            None,
            "start_date=2024-08-01&end_date=2024-08-04",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/search-availability");
    let cookie = session_cookie(&res);

    let res = h
        .app
        .oneshot(get_with_cookie("/search-availability", &cookie))
        .await
        .unwrap();
    assert!(body_string(res).await.contains("No availability"));
}

#[tokio::test]
async fn admin_pages_require_a_logged_in_user() {
    let h = harness();
    let res = h.app.oneshot(get("/admin/dashboard")).await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/user/login");
}

async fn login(h: &Harness, email: &str, password: &str) -> (StatusCode, String, String) {
    let res = h
        .app
        .clone()
        .oneshot(post_form(
            "/user/login",
            None,
            &format!(
                "email={}&password={}",
                email.replace('@', "%40"),
                password
            ),
        ))
        .await
        .unwrap();
    let status = res.status();
    let cookie = session_cookie(&res);
    let loc = location(&res).to_string();
    (status, cookie, loc)
}

#[tokio::test]
async fn login_rotates_the_session_and_opens_the_dashboard() {
    let h = harness();
    h.store.add_user("admin@here.com", "hunter2").unwrap();

    let (status, cookie, loc) = login(&h, "admin@here.com", "hunter2").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(loc, "/admin/dashboard");

    let res = h
        .app
        .clone()
        .oneshot(get_with_cookie("/admin/dashboard", &cookie))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_string(res).await.contains("Logged in successfully"));

    // logout drops the session; the old cookie no longer opens the door
    let res = h
        .app
        .clone()
        .oneshot(get_with_cookie("/user/logout", &cookie))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/user/login");

    let res = h
        .app
        .oneshot(get_with_cookie("/admin/dashboard", &cookie))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/user/login");
}

#[tokio::test]
async fn wrong_password_bounces_back_to_the_login_page() {
    let h = harness();
    h.store.add_user("admin@here.com", "hunter2").unwrap();

    let (status, _, loc) = login(&h, "admin@here.com", "wrong").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(loc, "/user/login");
}

#[tokio::test]
async fn admin_calendar_round_trip_adds_and_removes_blocks() {
    let h = harness();
    let room = h.store.add_room("Generals Quarters");
    h.store.add_user("admin@here.com", "hunter2").unwrap();
    let (_, cookie, _) = login(&h, "admin@here.com", "hunter2").await;

    let existing = h.store.add_block(
        room,
        kernel::model::date::DateSpan::new(
            "2024-09-10".parse().unwrap(),
            "2024-09-11".parse().unwrap(),
        )
        .unwrap(),
    );

    // GET stashes the shown block maps in the session
    let res = h
        .app
        .clone()
        .oneshot(get_with_cookie(
            "/admin/reservations-calendar?y=2024&m=9",
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(body["year"], 2024);
    assert_eq!(body["rooms"][0]["block_map"]["2024-09-10"], existing.raw());

    // POST keeps nothing and adds one new block
    let res = h
        .app
        .clone()
        .oneshot(post_form(
            "/admin/reservations-calendar?y=2024&m=9",
            Some(&cookie),
            &format!("add_block_{room}_2024-09-20=1"),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/admin/reservations-calendar?y=2024&m=9");

    let rows = h.store.restrictions_for_room(room);
    assert_eq!(rows.len(), 1);
    assert!(!rows.iter().any(|r| r.id == existing));
    assert_eq!(rows[0].span.start().to_string(), "2024-09-20");
}

#[tokio::test]
async fn health_endpoints_answer_ok() {
    let h = harness();
    let res = h.app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let res = h.app.oneshot(get("/health/db")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
