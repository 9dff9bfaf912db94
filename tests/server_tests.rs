//! Tests for the `http` crate adapters

use serde_json::json;
use validize::dispatcher::{dispatch, DispatchResponse, ParamVec};
use validize::server::{into_http_response, parse_query_params, raw_request_from_http};
use validize::validator::{integer, optional, shape, string};

fn route_params(pairs: &[(&str, &str)]) -> ParamVec {
    pairs
        .iter()
        .map(|(k, v)| (std::sync::Arc::<str>::from(*k), v.to_string()))
        .collect()
}

#[test]
fn test_raw_request_from_http() {
    let req = http::Request::post("/pets/7?tag=a&tag=b&limit=10")
        .body(Some(json!({"name": "Rex"})))
        .unwrap();
    let raw = raw_request_from_http(req, route_params(&[("id", "7")]));

    assert_eq!(raw.get_path_param("id"), Some("7"));
    assert_eq!(raw.query_value(), json!({"tag": ["a", "b"], "limit": "10"}));
    assert_eq!(raw.body, Some(json!({"name": "Rex"})));
}

#[test]
fn test_raw_request_without_query_or_body() {
    let req = http::Request::get("/health").body(None).unwrap();
    let raw = raw_request_from_http(req, ParamVec::new());
    assert!(raw.query_params.is_empty());
    assert!(raw.path_params.is_empty());
    assert!(raw.body.is_none());
}

#[test]
fn test_parse_query_params_percent_decoding() {
    let params = parse_query_params("/search?name=J%C3%BCrgen&note=a+b");
    assert_eq!(params[0].1, "Jürgen");
    assert_eq!(params[1].1, "a b");
}

#[test]
fn test_into_http_response_json() {
    let resp = into_http_response(DispatchResponse::ok(json!({"id": 1}))).unwrap();
    assert_eq!(resp.status(), http::StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "application/json");
    assert_eq!(resp.body(), br#"{"id":1}"#);
}

#[test]
fn test_into_http_response_text_and_empty() {
    let resp = into_http_response(DispatchResponse::ok(json!("Name was abc"))).unwrap();
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(resp.body(), b"Name was abc");

    for status in [200, 400, 404, 500] {
        let resp = into_http_response(DispatchResponse::empty(status)).unwrap();
        assert_eq!(resp.status().as_u16(), status);
        assert!(resp.headers().get(http::header::CONTENT_TYPE).is_none());
        assert!(resp.body().is_empty());
    }
}

#[test]
fn test_into_http_response_rejects_invalid_status() {
    assert!(into_http_response(DispatchResponse::empty(42)).is_err());
}

#[test]
fn test_http_round_trip_through_endpoint() {
    let endpoint = dispatch()
        .parameters(shape().field("name", string("[a-z]+").unwrap()))
        .query(shape().field("page", optional(integer(1.0, 50.0).coerce())))
        .process(|req| {
            Ok(Some(json!({
                "name": req.parameters["name"],
                "page": req.query.get("page").cloned().unwrap_or(json!(1)),
            })))
        });

    let req = http::Request::get("/users/ada?page=3").body(None).unwrap();
    let resp = endpoint.handle(raw_request_from_http(req, route_params(&[("name", "ada")])));
    let resp = into_http_response(resp).unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body, json!({"name": "ada", "page": 3}));

    let req = http::Request::get("/users/ada?page=3&page=4").body(None).unwrap();
    let resp = endpoint.handle(raw_request_from_http(req, route_params(&[("name", "ada")])));
    assert_eq!(into_http_response(resp).unwrap().status(), 400);
}
