//! Verify request building and response parsing against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Request vectors go through the public resource methods with a recording
//! transport, so they check the verb, path and auth flag each operation
//! picks. Bodies are compared as parsed JSON to avoid false negatives from
//! key ordering.

use std::sync::{Arc, Mutex};

use overlay_core::client::parse_response;
use overlay_core::{
    ApiError, Config, HttpMethod, HttpRequest, HttpResponse, OverlayClient, Params, Transport,
};
use serde_json::Value;

/// Records requests and answers every call with an empty success envelope.
#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
}

impl Transport for RecordingTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"success":true}"#.to_string(),
        })
    }
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let cfg = &vectors["config"];
    let config = Config::new()
        .api_key(cfg["api_key"].as_str().unwrap())
        .auth_key(cfg["auth_key"].as_str().unwrap())
        .environment(cfg["environment"].as_str().unwrap());
    let base_url = config.environment.base_url();
    let transport = Arc::new(RecordingTransport::default());
    let client = OverlayClient::with_transport(config, base_url, transport.clone());

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["id"].as_str().unwrap_or_default();
        let params: Option<Params> = case["params"].as_object().cloned();
        let params = params.as_ref();

        let result = match (case["resource"].as_str().unwrap(), case["operation"].as_str().unwrap()) {
            ("wallet", "create") => client.wallet().create(params),
            ("token", "create") => client.token().create(params),
            ("token", "mint") => client.token().mint(id, params),
            ("token", "transfer") => client.token().transfer(id, params),
            ("token", "burn") => client.token().burn(id, params),
            ("nft", "create") => client.nft().create(params),
            ("nft", "mint") => client.nft().mint(id, params),
            ("nft", "transfer") => client.nft().transfer(id, params),
            ("nft", "burn") => client.nft().burn(id, params),
            (resource, operation) => panic!("{name}: unknown operation {resource}.{operation}"),
        };
        assert!(result.unwrap().success(), "{name}: result");

        let req = transport.requests.lock().unwrap().last().cloned().unwrap();
        let expected = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");

        for header in expected["headers"].as_array().unwrap() {
            let pair = header.as_array().unwrap();
            let (key, value) = (pair[0].as_str().unwrap(), pair[1].as_str().unwrap());
            assert_eq!(req.header(key), Some(value), "{name}: header {key}");
        }
        for header in expected["absent_headers"].as_array().unwrap() {
            let key = header.as_str().unwrap();
            assert_eq!(req.header(key), None, "{name}: header {key} should be absent");
        }

        match &expected["body"] {
            Value::Null => assert!(req.body.is_none(), "{name}: body should be None"),
            body => {
                let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&sent, body, "{name}: body");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = parse_response(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error["kind"].as_str().unwrap() {
                "HttpError" => match err {
                    ApiError::HttpError { status, message } => {
                        assert_eq!(u64::from(status), expected_error["status"].as_u64().unwrap(), "{name}: status");
                        assert_eq!(message, expected_error["message"].as_str().unwrap(), "{name}: message");
                    }
                    other => panic!("{name}: expected HttpError, got {other:?}"),
                },
                "DecodeError" => match err {
                    ApiError::DecodeError { body, .. } => {
                        assert_eq!(body, sim["body"].as_str().unwrap(), "{name}: raw body");
                    }
                    other => panic!("{name}: expected DecodeError, got {other:?}"),
                },
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let flat = result.unwrap();
            assert_eq!(Value::from(flat), case["expected_result"], "{name}: flattened result");
        }
    }
}
