#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rsala::api::{ApiClient, ApiRequest, ApiResponse, Method, Transport};
use rsala::errors::AppResult;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

/// The binary, with HOME pointed at a private directory so the user's real
/// configuration is never read.
pub fn rsala(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("rsala");
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

/// Fresh HOME directory for one test
pub fn setup_home(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rsala_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp home");
    path.to_string_lossy().to_string()
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rsala.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Scripted booking backend. Responses queued for a route are served in
/// order and the last one repeats; unknown routes answer 404.
#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Rc<RefCell<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    routes: HashMap<String, VecDeque<ApiResponse>>,
    requests: Vec<ApiRequest>,
}

fn route(method: Method, path: &str) -> String {
    format!("{method} {path}")
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.inner
            .borrow_mut()
            .routes
            .entry(route(method, path))
            .or_default()
            .push_back(ApiResponse {
                status,
                body: body.to_string(),
            });
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.borrow().requests.clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.inner
            .borrow()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn client(&self, read_retries: u32) -> ApiClient {
        ApiClient::new(Box::new(self.clone()), read_retries)
    }
}

impl Transport for FakeApi {
    fn execute(&self, req: &ApiRequest) -> AppResult<ApiResponse> {
        let mut state = self.inner.borrow_mut();
        state.requests.push(req.clone());
        let resp = match state.routes.get_mut(&route(req.method, &req.path)) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        Ok(resp.unwrap_or(ApiResponse {
            status: 404,
            body: String::new(),
        }))
    }
}
