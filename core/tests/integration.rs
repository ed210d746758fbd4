//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `UbersmithClient`
//! over real HTTP through the default `UreqTransport`.

use serde::Deserialize;
use serde_json::json;
use ubersmith_core::{ApiError, ClientConfig, Envelope, Params, UbersmithClient, TRANSPORT_ERROR_CODE};

const USER: &str = "admin";
const TOKEN: &str = "s3cret";

/// Start the mock server in a background thread and return its API URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, mock_server::Credentials::new(USER, TOKEN)).await
        })
        .unwrap();
    });

    format!("http://{addr}{}", mock_server::API_PATH)
}

fn params(value: serde_json::Value) -> Params {
    serde_json::from_value(value).unwrap()
}

#[derive(Debug, Deserialize)]
struct ClientRecord {
    client_id: String,
    full_name: String,
    #[serde(default)]
    company: String,
}

#[test]
fn client_lifecycle() {
    let api = UbersmithClient::new(ClientConfig::new(start_server(), USER, TOKEN));

    // Step 1: add a client.
    let env = api.call(
        "client.add",
        &params(json!({
            "first": "Alice",
            "last": "Doe",
            "email": "alice@example.com",
            "tags": ["vip", "network"],
        })),
    );
    assert!(env.status, "client.add failed: {}", env.error_message);
    let id: String = env.load().unwrap();
    assert_eq!(id, "1001");

    // Step 2: read it back by dotted path.
    let env = api.call("client.get", &params(json!({ "client_id": id })));
    assert!(env.status);
    assert_eq!(env.key("full_name"), "Alice Doe");
    assert_eq!(env.key("tags.1.tag"), "network");
    assert!(env.key("tags.2.tag").is_null());
    assert_eq!(env.key("tags.first.tag"), "vip");

    // Step 3: typed decode ignores unmodelled fields.
    let record: ClientRecord = env.load().unwrap();
    assert_eq!(record.client_id, "1001");
    assert_eq!(record.full_name, "Alice Doe");
    assert!(record.company.is_empty());

    // Step 4: list is keyed by id.
    let env = api.call("client.list", &Params::new());
    assert_eq!(env.key("1001.email"), "alice@example.com");

    // Step 5: submit a ticket.
    let env = api.call(
        "support.ticket_submit",
        &params(json!({ "subject": "Down", "body": "Unreachable", "client_id": "1001" })),
    );
    assert!(env.status);
    assert_eq!(env.load::<u64>().unwrap(), 1);
}

#[test]
fn remote_errors_arrive_as_envelopes() {
    let api = UbersmithClient::new(ClientConfig::new(start_server(), USER, TOKEN));

    let env = api.call("client.get", &params(json!({ "client_id": "4242" })));
    assert!(!env.status);
    assert_eq!(env.error_code, mock_server::ERR_NOT_FOUND);
    assert!(!env.is_transport_failure());

    let env = api.call("no.such_method", &Params::new());
    assert_eq!(env.error_code, mock_server::ERR_INVALID_METHOD);
    assert_eq!(env.error_message, "Invalid method specified.");
}

#[test]
fn wrong_token_is_remote_unauthorized() {
    let api = UbersmithClient::new(ClientConfig::new(start_server(), USER, "wrong"));
    let env = api.call("uber.method_list", &Params::new());
    assert!(!env.status);
    assert_eq!(env.error_code, mock_server::ERR_UNAUTHORIZED);
    assert_eq!(env.error_message, "Unauthorized");
}

#[test]
fn connection_refused_is_transport_failure() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let api = UbersmithClient::new(ClientConfig::new(format!("http://{addr}/api/2.0/"), USER, TOKEN));

    let env: Envelope = api.call("client.get", &Params::new());
    assert!(!env.status);
    assert_eq!(env.error_code, TRANSPORT_ERROR_CODE);
    assert!(!env.error_message.is_empty());
    assert!(env.raw_data.is_none());

    let err = api.try_call("client.get", &Params::new()).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[test]
fn concurrent_calls_share_one_client() {
    let api = std::sync::Arc::new(UbersmithClient::new(ClientConfig::new(start_server(), USER, TOKEN)));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let api = std::sync::Arc::clone(&api);
            std::thread::spawn(move || api.call("uber.method_list", &Params::new()))
        })
        .collect();
    for handle in handles {
        let env = handle.join().unwrap();
        assert!(env.status);
        let methods: std::collections::HashMap<String, String> = env.load().unwrap();
        assert!(methods.contains_key("client.get"));
    }
}
