//! Minimal in-process stand-in for the page-content backend, used by the
//! integration tests. Serves the REST surface the client talks to and
//! records every request it sees.

use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::{json, Value};

#[derive(Debug, Default)]
pub struct StubState {
    /// Stored pages by slug; POST/PUT write here, GET serves from here.
    pub pages: HashMap<String, Value>,
    /// Method + path of every request, in order.
    pub requests: Vec<(String, String)>,
    /// When set, save endpoints answer 500.
    pub fail_saves: bool,
    /// When set, download-from-url endpoints answer 500 with an error body.
    pub fail_downloads: bool,
    next_id: i64,
}

pub struct StudioStub {
    pub base_url: String,
    pub state: Arc<Mutex<StubState>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl StudioStub {
    pub fn spawn() -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start studio stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}/");

        let state = Arc::new(Mutex::new(StubState {
            next_id: 1,
            ..StubState::default()
        }));
        let thread_state = Arc::clone(&state);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            let mut request = match server.recv_timeout(Duration::from_millis(50)) {
                Ok(Some(req)) => req,
                Ok(None) => continue,
                Err(_) => break,
            };

            let method = request.method().to_string();
            let path = request.url().to_string();
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);

            let (status, response_body) = {
                let mut state = thread_state.lock().expect("stub state lock");
                state.requests.push((method.clone(), path.clone()));
                route(&mut state, &method, &path, &body)
            };

            let response = tiny_http::Response::from_string(response_body.to_string())
                .with_status_code(status)
                .with_header(
                    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .expect("build header"),
                );
            let _ = request.respond(response);
        });

        Self {
            base_url,
            state,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn insert_page(&self, slug: &str, page: Value) {
        self.state
            .lock()
            .expect("stub state lock")
            .pages
            .insert(slug.to_string(), page);
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.state.lock().expect("stub state lock").fail_saves = fail;
    }

    pub fn set_fail_downloads(&self, fail: bool) {
        self.state.lock().expect("stub state lock").fail_downloads = fail;
    }

    pub fn requests(&self) -> Vec<(String, String)> {
        self.state.lock().expect("stub state lock").requests.clone()
    }
}

impl Drop for StudioStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn route(state: &mut StubState, method: &str, path: &str, body: &str) -> (u16, Value) {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        ("GET", ["page-content", slug]) => match state.pages.get(*slug) {
            Some(page) => (200, page.clone()),
            None => (404, json!({ "error": "page not found" })),
        },

        ("POST", ["page-content"]) => {
            if state.fail_saves {
                return (500, json!({ "error": "create rejected" }));
            }
            let Ok(mut page) = serde_json::from_str::<Value>(body) else {
                return (400, json!({ "error": "invalid json" }));
            };
            let id = state.next_id;
            state.next_id += 1;
            page["id"] = json!(id);
            let slug = page["slug"].as_str().unwrap_or_default().to_string();
            state.pages.insert(slug, page);
            (200, json!({ "success": true, "id": id }))
        }

        ("PUT", ["page-content", id]) => {
            if state.fail_saves {
                return (500, json!({ "error": "update rejected" }));
            }
            let Ok(mut page) = serde_json::from_str::<Value>(body) else {
                return (400, json!({ "error": "invalid json" }));
            };
            let Ok(id) = id.parse::<i64>() else {
                return (400, json!({ "error": "bad id" }));
            };
            page["id"] = json!(id);
            let slug = page["slug"].as_str().unwrap_or_default().to_string();
            state.pages.insert(slug, page);
            (200, json!({ "success": true }))
        }

        ("DELETE", ["page-content", id]) => {
            let Ok(id) = id.parse::<i64>() else {
                return (400, json!({ "error": "bad id" }));
            };
            let removed = state
                .pages
                .values()
                .any(|page| page["id"].as_i64() == Some(id));
            state.pages.retain(|_, page| page["id"].as_i64() != Some(id));
            if removed {
                (200, json!({ "success": true }))
            } else {
                (404, json!({ "error": "page not found" }))
            }
        }

        ("POST", ["upload", kind]) | ("POST", ["upload", kind, _]) => {
            (200, hosted_response(kind, "uploaded", true))
        }

        ("POST", [endpoint, _subfolder]) if endpoint.starts_with("download-") => {
            if state.fail_downloads {
                return (500, json!({ "error": "remote fetch failed" }));
            }
            let kind = endpoint
                .trim_start_matches("download-")
                .trim_end_matches("-from-url");
            (200, hosted_response(kind, "localized", false))
        }

        _ => (404, json!({ "error": "unknown route" })),
    }
}

/// `{ "success": true, "<kind>Url": "/uploads/<kind>s/<stem>.<kind>" }`
fn hosted_response(kind: &str, stem: &str, with_success: bool) -> Value {
    let mut body = serde_json::Map::new();
    if with_success {
        body.insert("success".to_string(), json!(true));
    }
    body.insert(
        format!("{kind}Url"),
        json!(format!("/uploads/{kind}s/{stem}.{kind}")),
    );
    Value::Object(body)
}
