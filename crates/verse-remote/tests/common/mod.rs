//! In-process fake of the execution service and project store, served with
//! `tiny_http` on a random loopback port.

use std::collections::BTreeMap;
use std::io::Read;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

#[derive(Default)]
struct FakeState {
    next_id: u64,
    projects: BTreeMap<String, Value>,
    run_status: u16,
    run_body: String,
    requests: Vec<String>,
}

/// Handle to a running fake. The server thread lives until the test process
/// exits.
#[derive(Clone)]
pub struct FakeRemote {
    pub base_url: String,
    state: Arc<Mutex<FakeState>>,
}

impl FakeRemote {
    pub fn start() -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind fake remote");
        let port = server
            .server_addr()
            .to_ip()
            .map(|a| a.port())
            .expect("fake remote has an ip address");

        let state = Arc::new(Mutex::new(FakeState {
            run_status: 200,
            run_body: json!({"output": "done"}).to_string(),
            ..FakeState::default()
        }));

        let thread_state = Arc::clone(&state);
        std::thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let method = request.method().to_string();
                let url = request.url().to_string();
                let (status, payload) = handle(&thread_state, &method, &url, &body);
                let response = tiny_http::Response::from_string(payload)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json")
                            .unwrap(),
                    );
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            state,
        }
    }

    /// Make the next `/run` calls answer with `status` and a raw `body`.
    pub fn set_run_response(&self, status: u16, body: &str) {
        let mut state = self.state.lock().unwrap();
        state.run_status = status;
        state.run_body = body.to_string();
    }

    /// Stored code of a project, bypassing the HTTP surface.
    pub fn stored_code(&self, project_id: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.projects.get(project_id).and_then(|p| p["code"].as_str().map(String::from))
    }

    /// `"METHOD /path"` for every request seen so far.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }
}

fn handle(state: &Mutex<FakeState>, method: &str, url: &str, body: &str) -> (u16, String) {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("{method} {url}"));
    let segments: Vec<&str> = url.trim_start_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        ("POST", ["run"]) => (state.run_status, state.run_body.clone()),
        ("GET", ["projects"]) => {
            let projects: Vec<Value> = state.projects.values().cloned().collect();
            (200, json!({ "projects": projects }).to_string())
        }
        ("POST", ["project", "create"]) => {
            let Ok(mut record) = serde_json::from_str::<Value>(body) else {
                return (422, json!({"detail": "bad body"}).to_string());
            };
            state.next_id += 1;
            let id = format!("p{}", state.next_id);
            record["_id"] = json!(id);
            state.projects.insert(id.clone(), record);
            (200, json!({ "project_id": id }).to_string())
        }
        ("GET", ["project", id]) => match state.projects.get(*id) {
            Some(record) => (200, record.to_string()),
            None => not_found(),
        },
        ("PUT", ["project", id, "update"]) => {
            let id = (*id).to_string();
            if !state.projects.contains_key(&id) {
                return not_found();
            }
            let Ok(mut record) = serde_json::from_str::<Value>(body) else {
                return (422, json!({"detail": "bad body"}).to_string());
            };
            record["_id"] = json!(id);
            state.projects.insert(id, record);
            (200, String::new())
        }
        ("DELETE", ["project", id, "delete"]) => match state.projects.remove(*id) {
            Some(_) => (200, String::new()),
            None => not_found(),
        },
        _ => (405, json!({"detail": "Method Not Allowed"}).to_string()),
    }
}

fn not_found() -> (u16, String) {
    (404, json!({"detail": "Project not found"}).to_string())
}
