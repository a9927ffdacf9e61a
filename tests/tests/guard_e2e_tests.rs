// Duplicate-submission guard, end to end: rejected duplicates never reach
// the wire, and the suppression window is measured from the last accepted
// request.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use atrium_integration_tests::{CannedResponse, CountingCredentials, TestServer};
use atrium_sdk::{ApiRequest, Client, ClientConfig, Error};

fn client_for(server: &TestServer) -> anyhow::Result<Client> {
    let cfg = ClientConfig { base_url: server.base_url.clone(), ..ClientConfig::default() };
    Ok(Client::new(cfg)?.with_credentials(Arc::new(CountingCredentials::new("t"))))
}

fn ok() -> CannedResponse {
    CannedResponse::ok_envelope(json!(null))
}

#[tokio::test]
async fn double_submit_within_window_is_rejected_locally() -> anyhow::Result<()> {
    let server = TestServer::spawn(vec![ok(), ok()]).await?;
    let client = client_for(&server)?;
    let body = json!({"a": 1});

    client
        .send_unit(ApiRequest::post("/x").json(&body)?)
        .await?;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let err = client
        .send_unit(ApiRequest::post("/x").json(&body)?)
        .await
        .expect_err("second submit must be suppressed");
    assert!(matches!(err, Error::DuplicateSubmission(_)));
    // The rejected request never reached the server.
    assert_eq!(server.request_count(), 1);

    // Well past the 500ms window the same request goes through again.
    tokio::time::sleep(Duration::from_millis(600)).await;
    client
        .send_unit(ApiRequest::post("/x").json(&body)?)
        .await?;
    assert_eq!(server.request_count(), 2);
    Ok(())
}

#[tokio::test]
async fn different_body_is_not_a_duplicate() -> anyhow::Result<()> {
    let server = TestServer::spawn(vec![ok(), ok()]).await?;
    let client = client_for(&server)?;

    client
        .send_unit(ApiRequest::post("/x").json(&json!({"a": 1}))?)
        .await?;
    client
        .send_unit(ApiRequest::post("/x").json(&json!({"a": 2}))?)
        .await?;
    assert_eq!(server.request_count(), 2);
    Ok(())
}

#[tokio::test]
async fn allow_repeat_bypasses_the_guard() -> anyhow::Result<()> {
    let server = TestServer::spawn(vec![ok(), ok()]).await?;
    let client = client_for(&server)?;
    let body = json!({"a": 1});

    client
        .send_unit(ApiRequest::post("/x").json(&body)?.allow_repeat())
        .await?;
    client
        .send_unit(ApiRequest::post("/x").json(&body)?.allow_repeat())
        .await?;
    assert_eq!(server.request_count(), 2);
    Ok(())
}

#[tokio::test]
async fn get_and_delete_bypass_the_guard() -> anyhow::Result<()> {
    let server = TestServer::spawn(vec![ok(), ok(), ok(), ok()]).await?;
    let client = client_for(&server)?;

    client.send_unit(ApiRequest::get("/x")).await?;
    client.send_unit(ApiRequest::get("/x")).await?;
    client.send_unit(ApiRequest::delete("/x/1")).await?;
    client.send_unit(ApiRequest::delete("/x/1")).await?;
    assert_eq!(server.request_count(), 4);
    Ok(())
}

#[tokio::test]
async fn put_is_guarded_like_post() -> anyhow::Result<()> {
    let server = TestServer::spawn(vec![ok(), ok()]).await?;
    let client = client_for(&server)?;
    let body = json!({"configKey": "k"});

    client
        .send_unit(ApiRequest::put("/system/config").json(&body)?)
        .await?;
    let err = client
        .send_unit(ApiRequest::put("/system/config").json(&body)?)
        .await
        .expect_err("immediate identical PUT must be suppressed");
    assert!(matches!(err, Error::DuplicateSubmission(_)));
    assert_eq!(server.request_count(), 1);
    Ok(())
}
