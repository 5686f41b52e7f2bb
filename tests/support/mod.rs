#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use checkupcli::{
    client::ApiClient, config::ClientConfig, events::EventBus, session::Session,
};
use serde_json::Value;

/// A request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Seen {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

#[derive(Debug, Clone)]
struct Reply {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

#[derive(Default)]
struct Shared {
    replies: Mutex<HashMap<(String, String), Reply>>,
    seen: Mutex<Vec<Seen>>,
}

/// Canned-response HTTP server on an ephemeral local port.
#[derive(Clone)]
pub struct FakeBackend {
    pub url: String,
    shared: Arc<Shared>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&shared));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            url: format!("http://{addr}"),
            shared,
        }
    }

    pub fn reply(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.reply_raw(method, path, status, &body.to_string())
    }

    pub fn reply_raw(&self, method: &str, path: &str, status: u16, body: &str) -> &Self {
        self.insert(method, path, status, body, None)
    }

    pub fn reply_slow(&self, method: &str, path: &str, delay: Duration) -> &Self {
        self.insert(method, path, 200, "{}", Some(delay))
    }

    fn insert(
        &self,
        method: &str,
        path: &str,
        status: u16,
        body: &str,
        delay: Option<Duration>,
    ) -> &Self {
        self.shared.replies.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            Reply {
                status,
                body: body.to_string(),
                delay,
            },
        );
        self
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.shared.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> Seen {
        self.seen().last().cloned().expect("at least one request")
    }

    pub fn client(&self) -> ApiClient {
        self.client_with(Session::in_memory())
    }

    pub fn client_with(&self, session: Session) -> ApiClient {
        ApiClient::builder(ClientConfig::new(self.url.clone()))
            .session(session)
            .events(EventBus::new())
            .build()
            .expect("client builds")
    }
}

async fn handle(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    shared.seen.lock().unwrap().push(Seen {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        headers: headers
            .iter()
            .filter_map(|(k, v)| Some((k.to_string(), v.to_str().ok()?.to_string())))
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let reply = shared
        .replies
        .lock()
        .unwrap()
        .get(&(method.to_string(), uri.path().to_string()))
        .cloned();

    match reply {
        Some(reply) => {
            if let Some(delay) = reply.delay {
                tokio::time::sleep(delay).await;
            }
            let status = StatusCode::from_u16(reply.status).unwrap();
            (
                status,
                [(header::CONTENT_TYPE, "application/json")],
                reply.body,
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"detail":"Not Found"}"#.to_string(),
        )
            .into_response(),
    }
}
