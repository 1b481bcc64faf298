use notifia_core::api::{ApiRequest, HttpTransport};
use notifia_core::config::ApiConfig;
use notifia_infrastructure::ReqwestTransport;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> ReqwestTransport {
    ReqwestTransport::new(&ApiConfig {
        base_url: format!("{}/api", server.uri()),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"email": "ana@example.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::post("/auth/login")
        .with_json(&json!({"email": "ana@example.com", "password": "pw"}))
        .unwrap();
    let response = transport_for(&server).send(request).await.unwrap();

    assert_eq!(response.status, 200);
    assert!(response.is_success());
}

#[tokio::test]
async fn test_get_sends_query_pairs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("page", "1"))
        .and(query_param("search", "eclipse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {"articles": []}})))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::get("/articles").with_query(vec![
        ("page".to_string(), "1".to_string()),
        ("search".to_string(), "eclipse".to_string()),
    ]);
    let response = transport_for(&server).send(request).await.unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_non_success_status_is_a_response_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"success": false, "message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let response = transport_for(&server)
        .send(ApiRequest::post("/auth/login"))
        .await
        .unwrap();

    assert_eq!(response.status, 401);
    assert_eq!(response.message().as_deref(), Some("Invalid credentials"));
}

#[tokio::test]
async fn test_session_cookie_is_sent_on_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sid=abc123; Path=/")
                .set_body_json(json!({"success": true})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/articles/bookmarks"))
        .and(header("cookie", "sid=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    transport.send(ApiRequest::post("/auth/login")).await.unwrap();
    let response = transport
        .send(ApiRequest::get("/articles/bookmarks"))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_exported_cookies_carry_over_to_new_transport() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sid=xyz789; Path=/; HttpOnly")
                .set_body_json(json!({"success": true})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/articles/4/like"))
        .and(header("cookie", "sid=xyz789"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let first = transport_for(&server);
    first.send(ApiRequest::post("/auth/login")).await.unwrap();
    let saved = first.cookie_header().unwrap();
    assert_eq!(saved, "sid=xyz789");

    let second = transport_for(&server);
    second.restore_cookies(&saved);
    let response = second
        .send(ApiRequest::post("/articles/4/like"))
        .await
        .unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Nothing listens on port 9 (discard) on test machines
    let transport = ReqwestTransport::new(&ApiConfig {
        base_url: "http://127.0.0.1:9/api".to_string(),
        timeout_secs: 2,
    })
    .unwrap();

    let err = transport
        .send(ApiRequest::post("/auth/logout"))
        .await
        .unwrap_err();
    assert!(err.is_network());
}
