//! HTTP routes of the chat relay.

use super::client::AgentRuntime;
use super::page::INDEX_HTML;
use crate::render::render_value;
use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Cookie carrying the conversation identifier.
pub const SESSION_COOKIE: &str = "tripmate_session";

/// Body returned by `/call_llm` whenever the runtime cannot be used.
pub const RELAY_ERROR_HTML: &str = "<div class='relay-error' style='color:red;'>⚠️ 發生錯誤：無法連接到 AI Agent，請確認 Server 是否已啟動。</div>";

/// Shared relay state.
pub struct RelayState {
    runtime: Arc<dyn AgentRuntime>,
}

impl RelayState {
    pub fn new(runtime: Arc<dyn AgentRuntime>) -> Self {
        Self { runtime }
    }
}

/// Build the relay router.
pub fn router(state: Arc<RelayState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/call_llm", post(call_llm))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Mint a new session identifier.
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn session_cookie(session_id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Whether `id` has exactly the shape [`new_session_id`] produces.
fn is_session_id(id: &str) -> bool {
    uuid::Uuid::parse_str(id)
        .map(|uuid| uuid.hyphenated().to_string() == id)
        .unwrap_or(false)
}

/// Read the session id from the jar, minting and storing one if absent or malformed.
fn ensure_session(jar: CookieJar) -> (CookieJar, String) {
    match jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) {
        Some(id) if is_session_id(&id) => (jar, id),
        previous => {
            if previous.is_some() {
                warn!("Ignoring malformed session cookie");
            }
            let id = new_session_id();
            info!("New chat session {}", id);
            (jar.add(session_cookie(id.clone())), id)
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ChatForm {
    #[serde(default)]
    message: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn index(State(state): State<Arc<RelayState>>, jar: CookieJar) -> impl IntoResponse {
    let (jar, session_id) = ensure_session(jar);

    if let Err(e) = state.runtime.create_session(&session_id).await {
        warn!("Agent runtime might be down or unreachable: {}", e);
    }

    (jar, Html(INDEX_HTML))
}

async fn call_llm(
    State(state): State<Arc<RelayState>>,
    jar: CookieJar,
    form: Result<Form<ChatForm>, FormRejection>,
) -> impl IntoResponse {
    let (jar, session_id) = ensure_session(jar);
    let message = form.map(|Form(f)| f.message).unwrap_or_default();
    info!("User: {}", message);

    let body = match state.runtime.run(&session_id, &message).await {
        Ok(reply) => render_value(&reply).unwrap_or_else(|| {
            warn!("Agent runtime reply is not a list of turns: {}", reply);
            RELAY_ERROR_HTML.to_string()
        }),
        Err(e) => {
            warn!("Error calling agent runtime: {}", e);
            RELAY_ERROR_HTML.to_string()
        }
    };

    (jar, Html(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, TripmateError};
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Runtime double recording calls and replaying a canned reply.
    #[derive(Default)]
    struct FakeRuntime {
        reply: Option<Value>,
        fail_sessions: bool,
        sessions: Mutex<Vec<String>>,
        runs: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl AgentRuntime for FakeRuntime {
        async fn create_session(&self, session_id: &str) -> Result<()> {
            self.sessions.lock().unwrap().push(session_id.to_string());
            if self.fail_sessions {
                return Err(TripmateError::AgentRuntime("connection refused".to_string()));
            }
            Ok(())
        }

        async fn run(&self, session_id: &str, message: &str) -> Result<Value> {
            self.runs
                .lock()
                .unwrap()
                .push((session_id.to_string(), message.to_string()));
            self.reply
                .clone()
                .ok_or_else(|| TripmateError::AgentRuntime("connection refused".to_string()))
        }
    }

    fn app(runtime: Arc<FakeRuntime>) -> Router {
        router(Arc::new(RelayState::new(runtime)))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_form(body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .uri("/call_llm")
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_index_mints_session_and_registers() {
        let runtime = Arc::new(FakeRuntime::default());
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app(runtime.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.starts_with(&format!("{}=", SESSION_COOKIE)));
        assert!(set_cookie.contains("HttpOnly"));

        let sessions = runtime.sessions.lock().unwrap().clone();
        assert_eq!(sessions.len(), 1);
        assert!(set_cookie.contains(&sessions[0]));

        assert!(body_string(response).await.contains("/call_llm"));
    }

    const EXISTING_ID: &str = "0b6f4c8e-2f7a-4d3b-9c61-5a0e8d2b7f14";

    #[tokio::test]
    async fn test_index_keeps_existing_session() {
        let runtime = Arc::new(FakeRuntime::default());
        let request = Request::builder()
            .uri("/")
            .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, EXISTING_ID))
            .body(Body::empty())
            .unwrap();

        let response = app(runtime.clone()).oneshot(request).await.unwrap();
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(*runtime.sessions.lock().unwrap(), [EXISTING_ID]);
    }

    #[tokio::test]
    async fn test_path_like_cookie_is_replaced() {
        let runtime = Arc::new(FakeRuntime::default());
        let request = Request::builder()
            .uri("/")
            .header(header::COOKIE, format!("{}=x/../../run", SESSION_COOKIE))
            .body(Body::empty())
            .unwrap();

        let response = app(runtime.clone()).oneshot(request).await.unwrap();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let sessions = runtime.sessions.lock().unwrap().clone();
        assert_eq!(sessions.len(), 1);
        assert!(is_session_id(&sessions[0]));
        assert!(set_cookie.contains(&sessions[0]));
    }

    #[tokio::test]
    async fn test_call_llm_replaces_malformed_cookie() {
        let runtime = Arc::new(FakeRuntime {
            reply: Some(json!([])),
            ..Default::default()
        });
        let cookie = format!("{}=abc%3Frun", SESSION_COOKIE);
        let response = app(runtime.clone())
            .oneshot(post_form("message=hi", Some(&cookie)))
            .await
            .unwrap();
        assert!(response.headers().get(header::SET_COOKIE).is_some());

        let runs = runtime.runs.lock().unwrap().clone();
        assert!(is_session_id(&runs[0].0));
    }

    #[tokio::test]
    async fn test_index_survives_registration_failure() {
        let runtime = Arc::new(FakeRuntime {
            fail_sessions: true,
            ..Default::default()
        });
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app(runtime).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("<form"));
    }

    #[tokio::test]
    async fn test_call_llm_renders_reply() {
        let runtime = Arc::new(FakeRuntime {
            reply: Some(json!([
                {"content": {"parts": [{"functionCall": {"name": "get_weather", "args": {"city": "Taipei"}}}]}},
                {"content": {"parts": [{"functionResponse": {"response": {"report": "Sunny, 25C"}}}]}},
                {"content": {"parts": [{"text": "**晴天**"}]}}
            ])),
            ..Default::default()
        });

        let cookie = format!("{}={}", SESSION_COOKIE, EXISTING_ID);
        let response = app(runtime.clone())
            .oneshot(post_form("message=Taipei+weather%3F", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/html"));

        let body = body_string(response).await;
        assert!(body.contains("get_weather"));
        assert!(body.contains("Sunny, 25C"));
        assert!(body.contains("<strong>晴天</strong>"));

        assert_eq!(
            *runtime.runs.lock().unwrap(),
            [(EXISTING_ID.to_string(), "Taipei weather?".to_string())]
        );
    }

    #[tokio::test]
    async fn test_call_llm_missing_field_is_empty_message() {
        let runtime = Arc::new(FakeRuntime {
            reply: Some(json!([])),
            ..Default::default()
        });

        let response = app(runtime.clone()).oneshot(post_form("", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "");

        let runs = runtime.runs.lock().unwrap().clone();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].1, "");
    }

    #[tokio::test]
    async fn test_call_llm_runtime_failure() {
        let runtime = Arc::new(FakeRuntime::default());
        let response = app(runtime).oneshot(post_form("message=hi", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, RELAY_ERROR_HTML);
    }

    #[tokio::test]
    async fn test_call_llm_non_list_reply() {
        let runtime = Arc::new(FakeRuntime {
            reply: Some(json!({"detail": "Session not found"})),
            ..Default::default()
        });
        let response = app(runtime).oneshot(post_form("message=hi", None)).await.unwrap();
        assert_eq!(body_string(response).await, RELAY_ERROR_HTML);
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(new_session_id(), new_session_id());
    }

    #[test]
    fn test_is_session_id() {
        assert!(is_session_id(&new_session_id()));
        assert!(is_session_id(EXISTING_ID));
        assert!(!is_session_id(""));
        assert!(!is_session_id("sess-1"));
        assert!(!is_session_id("x/../../run"));
        assert!(!is_session_id(&format!("{{{}}}", EXISTING_ID)));
        assert!(!is_session_id(&EXISTING_ID.to_uppercase()));
    }
}
