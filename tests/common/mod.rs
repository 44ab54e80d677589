#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use ractor::rpc::CallResult;
use ractor::ActorRef;
use repo_pin::actors::{WidgetArgs, WidgetController, WidgetMessage, WidgetStats};
use repo_pin::dom::{Document, PageHandles};
use repo_pin::error::{RepoPinError, Result};
use repo_pin::github::SearchBackend;
use repo_pin::models::{RepositoryHit, WidgetSnapshot};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const DEBOUNCE: Duration = Duration::from_millis(500);

pub fn hits(names: &[&str]) -> Vec<RepositoryHit> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| RepositoryHit::new(*name, format!("owner-{}", i), (i as u64) * 10))
        .collect()
}

#[derive(Clone)]
enum FakeReply {
    Hits(Vec<RepositoryHit>),
    Fail,
}

/// In-memory search backend with per-query canned replies and latency
#[derive(Default)]
pub struct FakeBackend {
    replies: Mutex<HashMap<String, (Duration, FakeReply)>>,
    calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, query: &str, hits: Vec<RepositoryHit>) {
        self.reply_after(query, Duration::ZERO, hits);
    }

    pub fn reply_after(&self, query: &str, delay: Duration, hits: Vec<RepositoryHit>) {
        self.replies
            .lock()
            .unwrap()
            .insert(query.to_string(), (delay, FakeReply::Hits(hits)));
    }

    pub fn fail(&self, query: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(query.to_string(), (Duration::ZERO, FakeReply::Fail));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for FakeBackend {
    async fn search(&self, query: &str) -> Result<Vec<RepositoryHit>> {
        self.calls.lock().unwrap().push(query.to_string());
        let reply = self.replies.lock().unwrap().get(query).cloned();

        match reply {
            Some((delay, reply)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                match reply {
                    FakeReply::Hits(hits) => Ok(hits),
                    FakeReply::Fail => Err(RepoPinError::Status {
                        status: 502,
                        body: "bad gateway".to_string(),
                    }),
                }
            }
            None => Ok(Vec::new()),
        }
    }
}

pub struct TestWidget {
    pub actor: ActorRef<WidgetMessage>,
    pub handles: PageHandles,
}

impl TestWidget {
    pub async fn mount(backend: Arc<FakeBackend>) -> Self {
        let (document, handles) = Document::with_search_page();
        let args = WidgetArgs {
            document,
            handles,
            backend,
            debounce: DEBOUNCE,
            repaint: None,
        };
        let (actor, _) = WidgetController::mount(args)
            .await
            .expect("Failed to mount widget");
        Self { actor, handles }
    }

    pub fn send(&self, message: WidgetMessage) {
        self.actor
            .send_message(message)
            .expect("Failed to send widget message");
    }

    pub fn type_text(&self, value: &str) {
        self.send(WidgetMessage::Input(value.to_string()));
    }

    pub async fn snapshot(&self) -> WidgetSnapshot {
        match self
            .actor
            .call(WidgetMessage::Snapshot, Some(Duration::from_secs(5)))
            .await
            .expect("Snapshot call failed")
        {
            CallResult::Success(snapshot) => snapshot,
            _ => panic!("Expected snapshot response"),
        }
    }

    pub async fn stats(&self) -> WidgetStats {
        match self
            .actor
            .call(WidgetMessage::GetStats, Some(Duration::from_secs(5)))
            .await
            .expect("Stats call failed")
        {
            CallResult::Success(stats) => stats,
            _ => panic!("Expected stats response"),
        }
    }

    /// Types `query`, waits out the debounce and returns the repainted view
    pub async fn search(&self, query: &str) -> WidgetSnapshot {
        self.type_text(query);
        tokio::time::sleep(DEBOUNCE + Duration::from_millis(100)).await;
        self.snapshot().await
    }
}

// Stub of the GitHub search API

#[derive(Clone)]
pub struct StubResponse {
    pub status: StatusCode,
    pub body: String,
    pub headers: Vec<(&'static str, String)>,
}

impl StubResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
            headers: Vec::new(),
        }
    }

    pub fn status(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }
}

struct StubState {
    response: StubResponse,
    queries: Arc<Mutex<Vec<String>>>,
}

pub struct StubApi {
    pub base_url: String,
    queries: Arc<Mutex<Vec<String>>>,
}

impl StubApi {
    pub async fn spawn(response: StubResponse) -> Self {
        let queries = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::new(StubState {
            response,
            queries: queries.clone(),
        });

        let app = Router::new()
            .route("/search/repositories", get(stub_search))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub API");
        let addr = listener.local_addr().expect("Stub API has no address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            queries,
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

async fn stub_search(
    State(state): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state
        .queries
        .lock()
        .unwrap()
        .push(params.get("q").cloned().unwrap_or_default());

    let mut headers = HeaderMap::new();
    for (name, value) in &state.response.headers {
        headers.insert(*name, HeaderValue::from_str(value).expect("Invalid header value"));
    }
    (state.response.status, headers, state.response.body.clone())
}

/// JSON body shaped like a search response with `count` repositories
pub fn search_body(count: usize) -> String {
    let items: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "name": format!("repo-{}", i),
                "full_name": format!("user-{}/repo-{}", i, i),
                "owner": { "login": format!("user-{}", i), "id": i },
                "stargazers_count": 1000 - i,
            })
        })
        .collect();
    serde_json::json!({
        "total_count": count,
        "incomplete_results": false,
        "items": items,
    })
    .to_string()
}
