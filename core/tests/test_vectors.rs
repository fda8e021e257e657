//! Verify every operation against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the expected request, a simulated
//! response, and either the expected decoded result or the expected error.
//! Results are compared as typed `Addon` values, so field order in the
//! vectors does not matter.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tukui::{
    Addon, ApiError, ApiResponse, Client, Flavor, HttpMethod, HttpRequest, HttpResponse, Transport,
    TransportError,
};
use url::Url;

const BASE_URL: &str = "http://localhost:3000/api.php";

/// Answers with one simulated response and remembers the request.
struct Replay {
    response: HttpResponse,
    seen: Mutex<Vec<HttpRequest>>,
}

impl Transport for Replay {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(self.response.clone())
    }
}

fn replay(sim: &Value) -> Arc<Replay> {
    let body = sim["body"].as_str().unwrap().to_string();
    Arc::new(Replay {
        response: HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: vec![("content-length".to_string(), body.len().to_string())],
            body,
        },
        seen: Mutex::new(Vec::new()),
    })
}

fn parse_flavor(s: &str) -> Flavor {
    match s {
        "retail" => Flavor::Retail,
        "classic" => Flavor::Classic,
        other => panic!("unknown flavor: {other}"),
    }
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

/// Check the single request the transport saw against `expected_request`.
fn check_request(name: &str, transport: &Replay, expected: &Value) {
    let seen = transport.seen.lock().unwrap();
    assert_eq!(seen.len(), 1, "{name}: request count");
    let req = &seen[0];

    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");

    let url = Url::parse(&req.url).unwrap();
    assert_eq!(&url[..url::Position::AfterPath], BASE_URL, "{name}: endpoint");

    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let expected_query: Vec<(String, String)> = expected["query"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let pair = pair.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(query, expected_query, "{name}: query");
}

/// Compare an operation's outcome with `expected_result` or `expected_error`.
fn check_outcome<T>(name: &str, case: &Value, outcome: Result<ApiResponse<T>, ApiError>)
where
    T: PartialEq + std::fmt::Debug + serde::de::DeserializeOwned,
{
    match case.get("expected_error").and_then(Value::as_str) {
        Some("empty response") => {
            let err = outcome.unwrap_err();
            assert!(err.is_empty_response(), "{name}: {err:?}");
            assert_eq!(err.to_string(), "empty response", "{name}");
        }
        Some("deserialization") => {
            let err = outcome.unwrap_err();
            assert!(matches!(err, ApiError::Deserialization { .. }), "{name}: {err:?}");
        }
        Some(other) => panic!("{name}: unknown expected_error {other}"),
        None => {
            let resp = outcome.unwrap_or_else(|err| panic!("{name}: {err}"));
            let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(resp.data, expected, "{name}: parsed result");
            assert_eq!(resp.raw.status, case["simulated_response"]["status"], "{name}: status");
        }
    }
}

fn client(transport: Arc<Replay>) -> Client {
    Client::builder().base_url(BASE_URL).shared_transport(transport).build()
}

// ---------------------------------------------------------------------------
// Single addon
// ---------------------------------------------------------------------------

#[test]
fn addon_test_vectors() {
    let raw = include_str!("../../test-vectors/addon.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let transport = replay(&case["simulated_response"]);
        let client = client(transport.clone());

        let flavor = parse_flavor(case["flavor"].as_str().unwrap());
        let id = case["input_id"].as_i64().unwrap();
        let outcome = client.addons(flavor).get_addon(id);

        check_request(name, &transport, &case["expected_request"]);
        check_outcome::<Addon>(name, case, outcome);
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[test]
fn addons_test_vectors() {
    let raw = include_str!("../../test-vectors/addons.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let transport = replay(&case["simulated_response"]);
        let client = client(transport.clone());

        let flavor = parse_flavor(case["flavor"].as_str().unwrap());
        let outcome = client.addons(flavor).get_addons();

        check_request(name, &transport, &case["expected_request"]);
        check_outcome::<Vec<Addon>>(name, case, outcome);
    }
}

// ---------------------------------------------------------------------------
// Main UIs
// ---------------------------------------------------------------------------

#[test]
fn ui_test_vectors() {
    let raw = include_str!("../../test-vectors/ui.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let transport = replay(&case["simulated_response"]);
        let client = client(transport.clone());

        let addons = client.addons(parse_flavor(case["flavor"].as_str().unwrap()));
        let outcome = match case["operation"].as_str().unwrap() {
            "tukui" => addons.get_tukui(),
            "elvui" => addons.get_elvui(),
            other => panic!("{name}: unknown operation {other}"),
        };

        check_request(name, &transport, &case["expected_request"]);
        check_outcome::<Addon>(name, case, outcome);
    }
}
