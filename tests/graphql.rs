//! GraphQL proxy tests against a mock Zone01 platform.

use std::io;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{Method, Request, StatusCode};
use zone01_gateway::GatewayConfig;

mod common;

const QUERY: &str = r#"{"query":"{ user { id login } }"}"#;

fn graphql_request(authorization: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/graphql")
        .header("content-type", "application/json");
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    builder.body(body).unwrap()
}

#[tokio::test]
async fn test_graphql_options_preflight() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/graphql")
        .body(Body::empty())
        .unwrap();

    let response = common::send(GatewayConfig::default(), request).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(
        response.headers()["access-control-allow-headers"],
        "Content-Type, Authorization"
    );
}

#[tokio::test]
async fn test_graphql_get_not_allowed() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/graphql")
        .body(Body::empty())
        .unwrap();

    let response = common::send(GatewayConfig::default(), request).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_graphql_missing_bearer() {
    let upstream = common::start_upstream(200, r#"{"data":{}}"#).await;

    for authorization in [None, Some("Basic dXNlcjpwYXNz"), Some("Bearer"), Some("token abc")] {
        let config = common::config_for(&upstream.base_url());
        let response = common::send(config, graphql_request(authorization, Body::from(QUERY))).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{:?}", authorization);
        assert_eq!(
            common::body_bytes(response).await,
            b"missing bearer token".to_vec()
        );
    }
    assert!(upstream.requests().is_empty());
}

#[tokio::test]
async fn test_graphql_body_read_error() {
    let upstream = common::start_upstream(200, r#"{"data":{}}"#).await;
    let config = common::config_for(&upstream.base_url());

    let failing = Body::from_stream(futures_util::stream::once(async {
        Err::<Bytes, io::Error>(io::Error::other("boom"))
    }));
    let response = common::send(config, graphql_request(Some("Bearer token"), failing)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(upstream.requests().is_empty());
}

#[tokio::test]
async fn test_graphql_oversized_body() {
    let upstream = common::start_upstream(200, r#"{"data":{}}"#).await;
    let mut config = common::config_for(&upstream.base_url());
    config.limits.max_body_bytes = 16;

    let response = common::send(config, graphql_request(Some("Bearer token"), Body::from(QUERY))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_graphql_upstream_unreachable() {
    let config = common::config_for("http://127.0.0.1:1");

    let response = common::send(config, graphql_request(Some("Bearer token"), Body::from(QUERY))).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        common::body_bytes(response).await,
        b"graphql upstream unreachable".to_vec()
    );
}

#[tokio::test]
async fn test_graphql_passthrough() {
    let upstream = common::start_upstream(418, r#"{"data":"ok"}"#).await;
    let config = common::config_for(&upstream.base_url());

    let request = graphql_request(Some("Bearer token"), Body::from(r#"{"query":"{}"}"#));
    let response = common::send(config, request).await;

    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(response.headers()["content-type"], "application/json");
    assert!(response.headers().get("x-upstream").is_none());
    assert_eq!(common::body_bytes(response).await, br#"{"data":"ok"}"#.to_vec());

    let seen = upstream.requests();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].path, "/graphql");
    assert_eq!(seen[0].header("authorization"), Some("Bearer token"));
    assert_eq!(seen[0].header("content-type"), Some("application/json"));
    assert_eq!(seen[0].body, br#"{"query":"{}"}"#.to_vec());
}

#[tokio::test]
async fn test_graphql_forwards_authorization_verbatim() {
    let upstream = common::start_upstream(200, r#"{"data":{"user":[]}}"#).await;
    let config = common::config_for(&upstream.base_url());

    let request = graphql_request(Some("bEaReR  spaced.jwt"), Body::from(QUERY));
    let response = common::send(config, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        upstream.requests()[0].header("authorization"),
        Some("bEaReR  spaced.jwt")
    );
}

#[tokio::test]
async fn test_graphql_errors_are_not_rewritten() {
    let body = r#"{"errors":[{"message":"field \"nope\" not found in type: 'query_root'","extensions":{"code":"validation-failed"}}]}"#;
    let upstream = common::start_upstream(200, body).await;
    let config = common::config_for(&upstream.base_url());

    let request = graphql_request(Some("Bearer token"), Body::from(QUERY));
    let response = common::send(config, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_bytes(response).await, body.as_bytes().to_vec());
}

#[tokio::test]
async fn test_graphql_upstream_error_status_passthrough() {
    let upstream = common::start_upstream(400, r#"{"error":"JWTExpired"}"#).await;
    let config = common::config_for(&upstream.base_url());

    let mut request = graphql_request(Some("Bearer expired"), Body::from(QUERY));
    request
        .headers_mut()
        .insert("origin", "https://profile.test".parse().unwrap());
    let response = common::send(config, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "https://profile.test"
    );
    assert_eq!(
        common::body_bytes(response).await,
        br#"{"error":"JWTExpired"}"#.to_vec()
    );
}

#[tokio::test]
async fn test_graphql_upstream_timeout() {
    let upstream = common::start_programmable_upstream(|| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        (200, r#"{"data":{}}"#.to_string())
    })
    .await;
    let mut config = common::config_for(&upstream.base_url());
    config.timeouts.graphql_secs = 1;

    let response = common::send(config, graphql_request(Some("Bearer token"), Body::from(QUERY))).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_graphql_request_build_failure() {
    let config = common::config_for("not a url");

    let response = common::send(
        config,
        graphql_request(Some("Bearer abc"), Body::from(QUERY)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
