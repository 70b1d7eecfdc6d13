//! Verify request building and error mapping against JSON test vectors stored
//! in `test-vectors/`.
//!
//! Request bodies and parsed results are compared as `serde_json::Value`, so
//! field ordering never causes false negatives.

mod common;

use common::{client, MockTransport, BASE_URL};
use tache_core::request::check_status;
use tache_core::{HttpMethod, HttpResponse, NewTask, TaskUpdate};

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Error messages
// ---------------------------------------------------------------------------

#[test]
fn error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse {
            status: case["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: case["body"].as_str().unwrap().to_string(),
        };
        let default_message = case["default_message"].as_str().unwrap();

        let err = check_status(&response, default_message).unwrap_err();
        assert_eq!(
            err.to_string(),
            case["expected_message"].as_str().unwrap(),
            "{name}: message"
        );
    }
}

// ---------------------------------------------------------------------------
// Task requests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let sim_body = sim["body"].as_str().unwrap();

        let transport = MockTransport::new();
        transport.respond(sim["status"].as_u64().unwrap() as u16, sim_body);
        let c = client(&transport);
        c.session().set_token("t0k").unwrap();
        let tasks = c.tasks();
        let id = case["input_id"].as_i64().unwrap_or_default();

        let result: serde_json::Value = match case["operation"].as_str().unwrap() {
            "list" => serde_json::to_value(tasks.list().await.unwrap()).unwrap(),
            "get" => serde_json::to_value(tasks.get(id).await.unwrap()).unwrap(),
            "create" => {
                let input: NewTask = serde_json::from_value(case["input"].clone()).unwrap();
                serde_json::to_value(tasks.create(&input).await.unwrap()).unwrap()
            }
            "update" => {
                let input: TaskUpdate = serde_json::from_value(case["input"].clone()).unwrap();
                serde_json::to_value(tasks.update(id, &input).await.unwrap()).unwrap()
            }
            "delete" => {
                tasks.delete(id).await.unwrap();
                serde_json::Value::Null
            }
            other => panic!("{name}: unknown operation: {other}"),
        };

        // Verify build
        let expected_req = &case["expected_request"];
        let req = transport.last_request();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(
            req.path,
            format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()),
            "{name}: path"
        );
        assert_eq!(req.header("authorization"), Some("Bearer t0k"), "{name}: authorization");
        assert_eq!(req.header("content-type"), Some("application/json"), "{name}: content-type");

        let req_body = match req.body.as_deref() {
            Some(body) => serde_json::from_str(body).unwrap(),
            None => serde_json::Value::Null,
        };
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let expected_result = if sim_body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(sim_body).unwrap()
        };
        assert_eq!(result, expected_result, "{name}: parsed result");
    }
}
