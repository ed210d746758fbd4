//! Verify `build_call` and `Envelope::key` against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Comparing parsed JSON (not raw strings) avoids false negatives from
//! field-ordering differences in serialized bodies.

use ubersmith_core::{ClientConfig, Envelope, HttpMethod, Params, UbersmithClient};

const HOST: &str = "https://billing.example.com/api/2.0/";

fn client() -> UbersmithClient {
    UbersmithClient::new(ClientConfig::new(HOST, "ops", "token-123"))
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn call_test_vectors() {
    let raw = include_str!("../../test-vectors/calls.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let method = case["method"].as_str().unwrap();
        let params: Params = serde_json::from_value(case["params"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        let req = c.build_call(method, &params).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{HOST}{}", expected_req["query"].as_str().unwrap()), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");
    }
}

// ---------------------------------------------------------------------------
// Path lookups
// ---------------------------------------------------------------------------

#[test]
fn key_path_test_vectors() {
    let raw = include_str!("../../test-vectors/key_paths.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let env: Envelope = serde_json::from_str(case["envelope"].as_str().unwrap()).unwrap();

        for lookup in case["lookups"].as_array().unwrap() {
            let path = lookup["path"].as_str().unwrap();
            assert_eq!(env.key(path), lookup["expected"], "{name}: key({path:?})");
        }
    }
}
