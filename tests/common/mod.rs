//! Shared harness for the workflow tests
//!
//! Drives a real `AppController` with injected key events, an in-memory
//! backend and a recording render stream.

#![allow(dead_code)]

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use rosterline::app::io::{MockEventStream, MockRenderStream};
use rosterline::app::models::ResourceKind;
use rosterline::app::services::{HttpTransport, MemoryBackend};
use rosterline::{AppController, ClientConfig};
use serde_json::{json, Value};

pub const TEST_SERVER: &str = "http://localhost:8000";

pub struct Harness<T: HttpTransport + 'static> {
    pub controller: AppController<MockEventStream, MockRenderStream, T>,
    pub screen: MockRenderStream,
}

impl Harness<MemoryBackend> {
    pub fn with_backend(backend: &MemoryBackend) -> Self {
        Self::with_transport(TEST_SERVER, backend.clone())
    }
}

impl<T: HttpTransport + 'static> Harness<T> {
    pub fn with_transport(server: &str, transport: T) -> Self {
        let config = ClientConfig::new("default", "/nonexistent/profile", server).unwrap();
        let screen = MockRenderStream::with_size((100, 30));
        let controller = AppController::with_io_streams(
            &config,
            transport,
            MockEventStream::empty(),
            screen.clone(),
        )
        .unwrap();
        Self { controller, screen }
    }

    /// Load both lists and wait for them
    pub async fn start(&mut self) {
        self.controller.start();
        self.controller.settle().await.unwrap();
    }

    pub fn press(&mut self, code: KeyCode) {
        self.controller
            .handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
            .unwrap();
    }

    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press(KeyCode::Char(ch));
        }
    }

    /// Type one value per field, moving to the next field with Tab
    pub fn fill_fields(&mut self, values: &[&str]) {
        for (index, value) in values.iter().enumerate() {
            if index > 0 {
                self.press(KeyCode::Tab);
            }
            self.type_text(value);
        }
    }

    pub async fn settle(&mut self) {
        self.controller.settle().await.unwrap();
    }

    pub fn headings(&self, kind: ResourceKind) -> Vec<String> {
        self.controller
            .state()
            .list(kind)
            .cards()
            .iter()
            .map(|card| card.heading().to_string())
            .collect()
    }

    pub fn last_notification(&self) -> Option<String> {
        self.controller
            .state()
            .notifications()
            .last()
            .map(|(_, message)| message.clone())
    }
}

pub fn ann() -> Value {
    json!({"name": "Ann", "age": 20, "email": "a@x.com", "course": "CS", "grade": null})
}

pub fn bob() -> Value {
    json!({"name": "Bob", "age": 22, "email": "b@x.com", "course": "Math", "grade": "B"})
}
