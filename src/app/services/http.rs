//! # HTTP Service
//!
//! Resource clients for the REST collections and the transport they run on.
//!
//! ```text
//! GET    /api/{collection}        list
//! GET    /api/{collection}/{id}   fetch one
//! POST   /api/{collection}        create
//! PUT    /api/{collection}/{id}   full replacement
//! DELETE /api/{collection}/{id}   delete
//! ```

use crate::app::error::OperationFailed;
use crate::app::models::{RecordId, Resource};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Url;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        })
    }
}

/// A request against one collection, optionally narrowed to a record
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub collection: &'static str,
    pub id: Option<RecordId>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Path relative to the API base, e.g. `students/65f0…`
    pub fn path(&self) -> String {
        match &self.id {
            Some(id) => format!("{}/{}", self.collection, id),
            None => self.collection.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn ensure_success(self) -> Result<Self, OperationFailed> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(OperationFailed::status(self.status))
        }
    }
}

/// Sends API requests. Production uses [`ReqwestTransport`]; tests swap in a mock.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, OperationFailed>;
}

/// `<server>/api`, the root every collection hangs off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: Url,
}

impl ApiEndpoint {
    pub fn new(server: &Url) -> Result<Self> {
        let mut base = server.clone();
        base.set_query(None);
        base.set_fragment(None);
        base.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Server URL '{server}' cannot be used as a base"))?
            .pop_if_empty()
            .push("api");
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for a collection or one of its records; the id is percent-encoded
    pub fn url_for(&self, collection: &str, id: Option<&RecordId>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(collection);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        url
    }
}

/// Transport backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    endpoint: ApiEndpoint,
}

impl ReqwestTransport {
    pub fn new(server: &Url) -> Result<Self> {
        tracing::debug!("Creating reqwest client for {server}");
        let client = reqwest::Client::builder()
            .user_agent(concat!("rosterline/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: ApiEndpoint::new(server)?,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, OperationFailed> {
        let url = self
            .endpoint
            .url_for(request.collection, request.id.as_ref());
        tracing::debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.into(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!("{} {} -> {}", request.method, request.path(), status);

        Ok(ApiResponse { status, body })
    }
}

/// CRUD client for one resource kind
pub struct ResourceClient<R, T> {
    transport: Arc<T>,
    _resource: PhantomData<fn() -> R>,
}

impl<R, T> Clone for ResourceClient<R, T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource, T: HttpTransport> ResourceClient<R, T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }

    /// POST the field set to the collection
    pub async fn create(&self, fields: &R::Fields) -> Result<(), OperationFailed> {
        let body = serde_json::to_value(fields)?;
        self.send(HttpMethod::Post, None, Some(body)).await?;
        Ok(())
    }

    /// GET the whole collection, in server order
    pub async fn list_all(&self) -> Result<Vec<R>, OperationFailed> {
        let response = self.send(HttpMethod::Get, None, None).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    pub async fn get_one(&self, id: &RecordId) -> Result<R, OperationFailed> {
        let response = self.send(HttpMethod::Get, Some(id), None).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// PUT a full replacement of every field
    pub async fn update(&self, id: &RecordId, fields: &R::Fields) -> Result<(), OperationFailed> {
        let body = serde_json::to_value(fields)?;
        self.send(HttpMethod::Put, Some(id), Some(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, id: &RecordId) -> Result<(), OperationFailed> {
        self.send(HttpMethod::Delete, Some(id), None).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: HttpMethod,
        id: Option<&RecordId>,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, OperationFailed> {
        let request = ApiRequest {
            method,
            collection: R::KIND.collection(),
            id: id.cloned(),
            body,
        };
        self.transport.send(request).await?.ensure_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{Book, BookFields, Student, StudentFields};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn student_client(server: &MockServer) -> ResourceClient<Student, ReqwestTransport> {
        let url = Url::parse(&server.uri()).unwrap();
        ResourceClient::new(Arc::new(ReqwestTransport::new(&url).unwrap()))
    }

    async fn book_client(server: &MockServer) -> ResourceClient<Book, ReqwestTransport> {
        let url = Url::parse(&server.uri()).unwrap();
        ResourceClient::new(Arc::new(ReqwestTransport::new(&url).unwrap()))
    }

    fn ann_fields() -> StudentFields {
        StudentFields {
            name: "Ann".into(),
            age: 20,
            email: "a@x.com".into(),
            course: "CS".into(),
            grade: None,
        }
    }

    #[test]
    fn endpoint_should_append_api_segment() {
        let endpoint = ApiEndpoint::new(&Url::parse("http://localhost:8000").unwrap()).unwrap();
        assert_eq!(endpoint.base().as_str(), "http://localhost:8000/api");

        let prefixed = ApiEndpoint::new(&Url::parse("https://host/roster/").unwrap()).unwrap();
        assert_eq!(prefixed.base().as_str(), "https://host/roster/api");
    }

    #[test]
    fn endpoint_should_encode_record_ids() {
        let endpoint = ApiEndpoint::new(&Url::parse("http://localhost:8000").unwrap()).unwrap();
        let url = endpoint.url_for("students", Some(&RecordId::assigned("a/b c")));
        assert_eq!(url.as_str(), "http://localhost:8000/api/students/a%2Fb%20c");
    }

    #[tokio::test]
    async fn create_should_post_fields_without_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/students"))
            .and(body_json(json!({
                "name": "Ann", "age": 20, "email": "a@x.com", "course": "CS", "grade": null
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "s1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = student_client(&server).await;
        client.create(&ann_fields()).await.unwrap();
    }

    #[tokio::test]
    async fn create_should_fail_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/students"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let client = student_client(&server).await;
        let error = client.create(&ann_fields()).await.unwrap_err();
        assert_eq!(error, OperationFailed::status(422));
    }

    #[tokio::test]
    async fn list_all_should_keep_server_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/books"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "b2", "title": "Zed", "author": "A", "isbn": "2", "year": 2001, "available": false},
                {"id": "b1", "title": "Abc", "author": "B", "isbn": "1", "year": 1999}
            ])))
            .mount(&server)
            .await;

        let books = book_client(&server).await.list_all().await.unwrap();
        let titles: Vec<_> = books.iter().map(|book| book.title.as_str()).collect();
        assert_eq!(titles, vec!["Zed", "Abc"]);
        assert!(books[1].available);
    }

    #[tokio::test]
    async fn list_all_should_reject_non_array_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/books"))
            .respond_with(ResponseTemplate::new(200).set_body_string("oops"))
            .mount(&server)
            .await;

        let error = book_client(&server).await.list_all().await.unwrap_err();
        assert!(matches!(error, OperationFailed::Decode(_)));
    }

    #[tokio::test]
    async fn get_one_should_fail_for_missing_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/students/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Student not found"})),
            )
            .mount(&server)
            .await;

        let error = student_client(&server)
            .await
            .get_one(&RecordId::assigned("missing"))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "server responded with 404 Not Found");
    }

    #[tokio::test]
    async fn update_should_put_full_field_set() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/books/b1"))
            .and(body_json(json!({
                "title": "Dune", "author": "Herbert", "isbn": "9", "year": 1965, "available": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let fields = BookFields {
            title: "Dune".into(),
            author: "Herbert".into(),
            isbn: "9".into(),
            year: 1965,
            available: false,
        };
        book_client(&server)
            .await
            .update(&RecordId::assigned("b1"), &fields)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_should_hit_record_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/students/s1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "Student deleted successfully"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        student_client(&server)
            .await
            .delete(&RecordId::assigned("s1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unreachable_server_should_be_transport_failure() {
        // Nothing listens on port 9 of the loopback interface
        let url = Url::parse("http://127.0.0.1:9").unwrap();
        let client: ResourceClient<Student, _> =
            ResourceClient::new(Arc::new(ReqwestTransport::new(&url).unwrap()));

        let error = client.list_all().await.unwrap_err();
        assert!(matches!(error, OperationFailed::Transport(_)));
    }
}
