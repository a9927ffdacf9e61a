// Request-encryption path: the transmitted body must never equal the
// plaintext serialization, the sealed key must ride in the `encrypt-key`
// header, and the recipient secret must be able to recover everything.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::json;

use atrium_crypto::{open_data_key, BodyCipher, CipherSuite, RecipientSecret};
use atrium_integration_tests::{CannedResponse, CountingCredentials, TestServer};
use atrium_sdk::{ApiRequest, Client, ClientConfig};

fn encrypted_client(
    server: &TestServer,
    recipient: &RecipientSecret,
) -> anyhow::Result<Client> {
    let cfg = ClientConfig {
        base_url: server.base_url.clone(),
        encrypt_requests: true,
        encrypt_public_key: Some(recipient.public().to_base64()),
        ..ClientConfig::default()
    };
    Ok(Client::new(cfg)?.with_credentials(Arc::new(CountingCredentials::new("t"))))
}

#[tokio::test]
async fn encrypted_put_hides_plaintext_and_is_recoverable() -> anyhow::Result<()> {
    let recipient = RecipientSecret::generate();
    let server = TestServer::spawn(vec![CannedResponse::ok_envelope(json!(null))]).await?;
    let client = encrypted_client(&server, &recipient)?;

    let payload = json!({"configKey": "sys.account", "configValue": "secret"});
    client
        .send_unit(
            ApiRequest::put("/system/config/updateByKey")
                .json(&payload)?
                .encrypted(),
        )
        .await?;

    let requests = server.requests();
    let req = &requests[0];
    let plaintext = payload.to_string();
    assert_ne!(req.body_text(), plaintext);

    let header = req.header("encrypt-key").expect("encrypt-key header missing");
    let key = open_data_key(&recipient, header)?;
    let ciphertext = BASE64.decode(req.body_text())?;
    let recovered = BodyCipher::new(CipherSuite::default(), key).open(&ciphertext)?;
    assert_eq!(String::from_utf8(recovered)?, plaintext);
    Ok(())
}

#[tokio::test]
async fn calls_without_the_flag_stay_plaintext() -> anyhow::Result<()> {
    let recipient = RecipientSecret::generate();
    let server = TestServer::spawn(vec![CannedResponse::ok_envelope(json!(null))]).await?;
    let client = encrypted_client(&server, &recipient)?;

    let payload = json!({"configKey": "k"});
    client
        .send_unit(ApiRequest::post("/system/config").json(&payload)?)
        .await?;

    let requests = server.requests();
    assert_eq!(requests[0].body_text(), payload.to_string());
    assert_eq!(requests[0].header("encrypt-key"), None);
    Ok(())
}

#[tokio::test]
async fn global_flag_off_disables_per_call_opt_in() -> anyhow::Result<()> {
    let server = TestServer::spawn(vec![CannedResponse::ok_envelope(json!(null))]).await?;
    let cfg = ClientConfig { base_url: server.base_url.clone(), ..ClientConfig::default() };
    let client = Client::new(cfg)?;

    let payload = json!({"a": 1});
    client
        .send_unit(ApiRequest::post("/x").json(&payload)?.encrypted())
        .await?;

    let requests = server.requests();
    assert_eq!(requests[0].body_text(), payload.to_string());
    assert_eq!(requests[0].header("encrypt-key"), None);
    Ok(())
}

#[tokio::test]
async fn get_requests_are_never_encrypted() -> anyhow::Result<()> {
    let recipient = RecipientSecret::generate();
    let server = TestServer::spawn(vec![CannedResponse::ok_envelope(json!(null))]).await?;
    let client = encrypted_client(&server, &recipient)?;

    client
        .send_unit(ApiRequest::get("/system/config/list").query("a", "1").encrypted())
        .await?;

    let requests = server.requests();
    assert_eq!(requests[0].header("encrypt-key"), None);
    assert_eq!(requests[0].target, "/system/config/list?a=1");
    Ok(())
}

#[tokio::test]
async fn each_encrypted_request_uses_a_fresh_key() -> anyhow::Result<()> {
    let recipient = RecipientSecret::generate();
    let server = TestServer::spawn(vec![
        CannedResponse::ok_envelope(json!(null)),
        CannedResponse::ok_envelope(json!(null)),
    ])
    .await?;
    let client = encrypted_client(&server, &recipient)?;

    for i in 0..2 {
        client
            .send_unit(ApiRequest::put("/x").json(&json!({"i": i}))?.encrypted())
            .await?;
    }

    let requests = server.requests();
    let key_a = requests[0].header("encrypt-key").map(str::to_string);
    let key_b = requests[1].header("encrypt-key").map(str::to_string);
    assert!(key_a.is_some() && key_b.is_some());
    assert_ne!(key_a, key_b);
    Ok(())
}
