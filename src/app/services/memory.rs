//! # In-Memory Backend
//!
//! A stateful stand-in for the REST server, used to drive the controller
//! headlessly. It stores records as JSON objects, assigns ids on create,
//! and records every request it receives.

use super::http::{ApiRequest, ApiResponse, HttpMethod, HttpTransport};
use crate::app::error::OperationFailed;
use crate::app::models::{RecordId, ResourceKind};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// How the backend answers the next requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendMode {
    #[default]
    Healthy,
    /// Every request gets a 500
    Failing,
    /// Every request fails before reaching the server
    Unreachable,
}

#[derive(Debug, Default)]
struct BackendState {
    collections: HashMap<&'static str, Vec<Map<String, Value>>>,
    next_id: u64,
    mode: BackendMode,
    requests: Vec<(HttpMethod, String)>,
}

/// Cheap to clone; clones share the same state
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<BackendState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&self, mode: BackendMode) {
        self.lock().mode = mode;
    }

    /// Insert a record directly, bypassing the request log. Returns its id.
    pub fn seed(&self, kind: ResourceKind, fields: Value) -> RecordId {
        let mut state = self.lock();
        // Non-object seeds become records holding only an id
        let object = match fields {
            Value::Object(object) => object,
            _ => Map::new(),
        };
        Self::insert(&mut state, kind.collection(), object)
    }

    /// Current records of a collection, in insertion order
    pub fn records(&self, kind: ResourceKind) -> Vec<Value> {
        self.lock()
            .collections
            .get(kind.collection())
            .map(|records| records.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    /// Every request received, as `(method, path)`
    pub fn requests(&self) -> Vec<(HttpMethod, String)> {
        self.lock().requests.clone()
    }

    pub fn count_requests(&self, method: HttpMethod) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|(logged, _)| *logged == method)
            .count()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        // A panic while holding the lock only happens inside a failing test
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn insert(
        state: &mut BackendState,
        collection: &'static str,
        mut object: Map<String, Value>,
    ) -> RecordId {
        state.next_id += 1;
        let id = format!("{:024x}", state.next_id);
        object.insert("id".to_string(), Value::String(id.clone()));
        state.collections.entry(collection).or_default().push(object);
        RecordId::assigned(id)
    }

    fn handle(state: &mut BackendState, request: ApiRequest) -> ApiResponse {
        let collection = request.collection;
        let noun = noun_for(collection);
        let records = state.collections.entry(collection).or_default();
        let position = request.id.as_ref().and_then(|id| {
            records
                .iter()
                .position(|record| record.get("id").and_then(Value::as_str) == Some(id.as_str()))
        });

        match (request.method, request.id.is_some(), position) {
            (HttpMethod::Get, false, _) => {
                let all: Vec<Value> = records.iter().cloned().map(Value::Object).collect();
                respond(200, Value::Array(all))
            }
            (HttpMethod::Post, false, _) => match request.body {
                Some(Value::Object(object)) => {
                    let id = Self::insert(state, collection, object);
                    let created = state
                        .collections
                        .get(collection)
                        .and_then(|records| records.last().cloned())
                        .map(Value::Object)
                        .unwrap_or_else(|| json!({ "id": id.as_str() }));
                    respond(200, created)
                }
                _ => respond(422, json!({ "detail": "Body must be a JSON object" })),
            },
            (HttpMethod::Get, true, Some(index)) => respond(200, Value::Object(records[index].clone())),
            (HttpMethod::Put, true, Some(index)) => match request.body {
                Some(Value::Object(object)) => {
                    let record = &mut records[index];
                    for (key, value) in object {
                        if key != "id" {
                            record.insert(key, value);
                        }
                    }
                    respond(200, Value::Object(record.clone()))
                }
                _ => respond(400, json!({ "detail": "No data to update" })),
            },
            (HttpMethod::Delete, true, Some(index)) => {
                records.remove(index);
                respond(200, json!({ "message": format!("{noun} deleted successfully") }))
            }
            (_, true, None) => respond(404, json!({ "detail": format!("{noun} not found") })),
            _ => respond(405, json!({ "detail": "Method Not Allowed" })),
        }
    }
}

fn noun_for(collection: &str) -> &'static str {
    match collection {
        "students" => "Student",
        "books" => "Book",
        _ => "Record",
    }
}

fn respond(status: u16, body: Value) -> ApiResponse {
    ApiResponse {
        status,
        body: body.to_string(),
    }
}

#[async_trait]
impl HttpTransport for MemoryBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, OperationFailed> {
        let mut state = self.lock();
        state.requests.push((request.method, request.path()));
        match state.mode {
            BackendMode::Healthy => Ok(Self::handle(&mut state, request)),
            BackendMode::Failing => Ok(respond(500, json!({ "detail": "Internal Server Error" }))),
            BackendMode::Unreachable => Err(OperationFailed::Transport(
                "error sending request: connection refused".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: HttpMethod, id: Option<&RecordId>, body: Option<Value>) -> ApiRequest {
        ApiRequest {
            method,
            collection: "students",
            id: id.cloned(),
            body,
        }
    }

    #[tokio::test]
    async fn post_should_assign_id_and_list_should_return_it() {
        let backend = MemoryBackend::new();
        let created = backend
            .send(request(HttpMethod::Post, None, Some(json!({"name": "Ann"}))))
            .await
            .unwrap();
        assert_eq!(created.status, 200);

        let listed = backend.send(request(HttpMethod::Get, None, None)).await.unwrap();
        let records: Vec<Value> = serde_json::from_str(&listed.body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], "Ann");
        assert!(records[0]["id"].is_string());
    }

    #[tokio::test]
    async fn missing_record_should_be_404() {
        let backend = MemoryBackend::new();
        let response = backend
            .send(request(HttpMethod::Delete, Some(&RecordId::assigned("nope")), None))
            .await
            .unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn post_to_record_path_should_be_405() {
        let backend = MemoryBackend::new();
        let id = backend.seed(ResourceKind::Student, json!({"name": "Ann"}));

        let response = backend
            .send(request(HttpMethod::Post, Some(&id), Some(json!({"name": "Bob"}))))
            .await
            .unwrap();

        assert_eq!(response.status, 405);
        assert_eq!(backend.records(ResourceKind::Student).len(), 1);
        assert_eq!(backend.records(ResourceKind::Student)[0]["name"], "Ann");
    }

    #[tokio::test]
    async fn put_should_not_touch_id() {
        let backend = MemoryBackend::new();
        let id = backend.seed(ResourceKind::Student, json!({"name": "Ann"}));

        backend
            .send(request(
                HttpMethod::Put,
                Some(&id),
                Some(json!({"id": "forged", "name": "Bob"})),
            ))
            .await
            .unwrap();

        let records = backend.records(ResourceKind::Student);
        assert_eq!(records[0]["id"], id.as_str());
        assert_eq!(records[0]["name"], "Bob");
    }

    #[tokio::test]
    async fn modes_should_fail_requests_but_log_them() {
        let backend = MemoryBackend::new();
        backend.set_mode(BackendMode::Failing);
        let response = backend.send(request(HttpMethod::Get, None, None)).await.unwrap();
        assert_eq!(response.status, 500);

        backend.set_mode(BackendMode::Unreachable);
        assert!(backend.send(request(HttpMethod::Get, None, None)).await.is_err());
        assert_eq!(backend.count_requests(HttpMethod::Get), 2);
    }
}
