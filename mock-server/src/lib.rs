use std::{collections::BTreeMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const API_PATH: &str = "/api/2.0/";

pub const ERR_UNAUTHORIZED: i64 = 1;
pub const ERR_BAD_PARAMETER: i64 = 2;
pub const ERR_INVALID_METHOD: i64 = 3;
pub const ERR_NOT_FOUND: i64 = 4;

/// The response envelope every method answers with.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub status: bool,
    pub error_code: i64,
    pub error_message: String,
    pub data: Value,
}

impl Envelope {
    fn ok(data: Value) -> Self {
        Self {
            status: true,
            error_code: 0,
            error_message: String::new(),
            data,
        }
    }

    fn fail(error_code: i64, error_message: impl Into<String>) -> Self {
        Self {
            status: false,
            error_code,
            error_message: error_message.into(),
            data: Value::String(String::new()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tag {
    pub tag_id: String,
    pub tag: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Client {
    pub client_id: String,
    pub first: String,
    pub last: String,
    pub full_name: String,
    pub email: String,
    pub company: String,
    pub tags: Vec<Tag>,
}

#[derive(Clone, Debug)]
pub struct Credentials {
    pub user: String,
    pub token: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            token: token.into(),
        }
    }

    fn matches(&self, headers: &HeaderMap) -> bool {
        let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
            return false;
        };
        let Some(encoded) = value.strip_prefix("Basic ") else {
            return false;
        };
        let Ok(decoded) = STANDARD.decode(encoded) else {
            return false;
        };
        let expected = format!("{}:{}", self.user, self.token);
        decoded == expected.as_bytes()
    }
}

#[derive(Default)]
struct Store {
    clients: BTreeMap<u64, Client>,
    next_client_id: u64,
    next_ticket_id: u64,
}

#[derive(Clone)]
struct AppState {
    store: Arc<RwLock<Store>>,
    credentials: Arc<Credentials>,
}

#[derive(Deserialize)]
struct MethodQuery {
    method: Option<String>,
}

const METHODS: &[(&str, &str)] = &[
    ("client.add", "Add a new client"),
    ("client.get", "Get client details"),
    ("client.list", "List all clients"),
    ("support.ticket_submit", "Submit a support ticket"),
    ("uber.method_list", "List available API methods"),
];

pub fn app(credentials: Credentials) -> Router {
    let state = AppState {
        store: Arc::new(RwLock::new(Store {
            next_client_id: 1001,
            next_ticket_id: 1,
            ..Store::default()
        })),
        credentials: Arc::new(credentials),
    };
    Router::new().route(API_PATH, post(dispatch)).with_state(state)
}

pub async fn run(listener: TcpListener, credentials: Credentials) -> Result<(), std::io::Error> {
    axum::serve(listener, app(credentials)).await
}

async fn dispatch(
    State(state): State<AppState>,
    Query(query): Query<MethodQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Envelope>) {
    if !state.credentials.matches(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(Envelope::fail(ERR_UNAUTHORIZED, "Unauthorized")),
        );
    }

    let params: Map<String, Value> = if body.is_empty() {
        Map::new()
    } else {
        match serde_json::from_slice(&body) {
            Ok(params) => params,
            Err(e) => {
                return (
                    StatusCode::OK,
                    Json(Envelope::fail(ERR_BAD_PARAMETER, format!("Invalid request body: {e}"))),
                )
            }
        }
    };

    let envelope = match query.method.as_deref().unwrap_or_default() {
        "client.add" => client_add(&state, &params).await,
        "client.get" => client_get(&state, &params).await,
        "client.list" => client_list(&state).await,
        "support.ticket_submit" => ticket_submit(&state, &params).await,
        "uber.method_list" => method_list(),
        _ => Envelope::fail(ERR_INVALID_METHOD, "Invalid method specified."),
    };
    (StatusCode::OK, Json(envelope))
}

/// Ubersmith accepts numeric parameters as strings and vice versa.
fn param(params: &Map<String, Value>, key: &str) -> Option<String> {
    match params.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn missing(key: &str) -> Envelope {
    Envelope::fail(ERR_BAD_PARAMETER, format!("Missing required parameter: {key}"))
}

async fn client_add(state: &AppState, params: &Map<String, Value>) -> Envelope {
    let Some(first) = param(params, "first") else {
        return missing("first");
    };
    let last = param(params, "last").unwrap_or_default();
    let tags = params
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| tags.iter().filter_map(Value::as_str).collect::<Vec<_>>())
        .unwrap_or_default();

    let mut store = state.store.write().await;
    let id = store.next_client_id;
    store.next_client_id += 1;
    let full_name = format!("{first} {last}").trim().to_string();
    let client = Client {
        client_id: id.to_string(),
        first,
        last,
        full_name,
        email: param(params, "email").unwrap_or_default(),
        company: param(params, "company").unwrap_or_default(),
        tags: tags
            .into_iter()
            .enumerate()
            .map(|(i, tag)| Tag {
                tag_id: (i + 1).to_string(),
                tag: tag.to_string(),
            })
            .collect(),
    };
    store.clients.insert(id, client);
    Envelope::ok(Value::String(id.to_string()))
}

async fn client_get(state: &AppState, params: &Map<String, Value>) -> Envelope {
    let Some(raw_id) = param(params, "client_id") else {
        return missing("client_id");
    };
    let Ok(id) = raw_id.parse::<u64>() else {
        return Envelope::fail(ERR_BAD_PARAMETER, format!("Invalid client_id: {raw_id}"));
    };
    let store = state.store.read().await;
    match store.clients.get(&id) {
        Some(client) => Envelope::ok(json!(client)),
        None => Envelope::fail(ERR_NOT_FOUND, format!("Client {id} not found")),
    }
}

async fn client_list(state: &AppState) -> Envelope {
    let store = state.store.read().await;
    let clients: Map<String, Value> = store
        .clients
        .values()
        .map(|c| (c.client_id.clone(), json!(c)))
        .collect();
    Envelope::ok(Value::Object(clients))
}

async fn ticket_submit(state: &AppState, params: &Map<String, Value>) -> Envelope {
    for key in ["subject", "body"] {
        if param(params, key).is_none() {
            return missing(key);
        }
    }
    let mut store = state.store.write().await;
    let id = store.next_ticket_id;
    store.next_ticket_id += 1;
    Envelope::ok(json!(id))
}

fn method_list() -> Envelope {
    let methods: Map<String, Value> = METHODS
        .iter()
        .map(|(name, description)| (name.to_string(), json!(description)))
        .collect();
    Envelope::ok(Value::Object(methods))
}
