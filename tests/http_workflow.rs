//! Workflows over real HTTP against a wiremock server

mod common;

use common::Harness;
use crossterm::event::KeyCode;
use reqwest::Url;
use rosterline::app::models::ResourceKind;
use rosterline::app::services::ReqwestTransport;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn harness_for(server: &MockServer) -> Harness<ReqwestTransport> {
    let url = Url::parse(&server.uri()).unwrap();
    let transport = ReqwestTransport::new(&url).unwrap();
    Harness::with_transport(&server.uri(), transport)
}

async fn mount_empty_books(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn create_should_post_and_reload_the_list() {
    let server = MockServer::start().await;
    mount_empty_books(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "65f0a1", "name": "Ann", "age": 20, "email": "a@x.com", "course": "CS", "grade": null}
        ])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/students"))
        .and(body_json(json!({
            "name": "Ann", "age": 20, "email": "a@x.com", "course": "CS", "grade": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "65f0a1"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = harness_for(&server).await;
    harness.start().await;
    harness.press(KeyCode::Char('a'));
    harness.fill_fields(&["Ann", "20", "a@x.com", "CS"]);
    harness.press(KeyCode::Enter);
    harness.settle().await;

    assert_eq!(harness.headings(ResourceKind::Student), vec!["👨‍🎓 Ann"]);
    assert!(harness.screen.get_buffer_string().contains("Not assigned"));
    assert_eq!(
        harness.last_notification().as_deref(),
        Some("Student added successfully!")
    );
}

#[tokio::test]
async fn update_should_put_the_full_record() {
    let server = MockServer::start().await;
    mount_empty_books(&server).await;
    let ann = json!({"id": "s1", "name": "Ann", "age": 20, "email": "a@x.com", "course": "CS", "grade": "A"});
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([ann.clone()])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/students/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ann))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/students/s1"))
        .and(body_json(json!({
            "name": "Ann", "age": 21, "email": "a@x.com", "course": "CS", "grade": "A"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "s1"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = harness_for(&server).await;
    harness.start().await;
    harness.press(KeyCode::Char('e'));
    harness.settle().await;

    harness.press(KeyCode::Tab);
    harness.press(KeyCode::Backspace);
    harness.type_text("1");
    harness.press(KeyCode::Enter);
    harness.settle().await;

    assert!(harness.controller.state().edit_session().is_closed());
    assert_eq!(
        harness.last_notification().as_deref(),
        Some("Student updated successfully!")
    );
}

#[tokio::test]
async fn delete_should_hit_the_record_url() {
    let server = MockServer::start().await;
    mount_empty_books(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "s1", "name": "Ann", "age": 20, "email": "a@x.com", "course": "CS"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/students/s1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Student deleted successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = harness_for(&server).await;
    harness.start().await;
    harness.press(KeyCode::Char('d'));
    harness.press(KeyCode::Enter);
    harness.settle().await;

    assert_eq!(
        harness.last_notification().as_deref(),
        Some("Student deleted successfully!")
    );
}

#[tokio::test]
async fn unreachable_server_should_report_load_errors() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let url = Url::parse(&uri).unwrap();
    let mut harness = Harness::with_transport(&uri, ReqwestTransport::new(&url).unwrap());
    harness.start().await;

    let state = harness.controller.state();
    assert!(!state.list(ResourceKind::Student).is_loaded());
    let errors: Vec<_> = state
        .notifications()
        .history()
        .map(|(_, message)| message.clone())
        .collect();
    assert!(errors.iter().any(|m| m.starts_with("Error loading students: ")));
    assert!(errors.iter().any(|m| m.starts_with("Error loading books: ")));
}
