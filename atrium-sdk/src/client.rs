#![forbid(unsafe_code)]

//! The request/response interceptor pipeline.
//!
//! Outbound: locale + client-id + bearer headers, GET query rewriting,
//! duplicate-submission guard, optional body encryption, multipart handling.
//! Inbound: business-code classification with forced logout on expired
//! sessions and unified translation of transport failures.
//!
//! Per request: BUILT → guard → [REJECTED | PASSED] → encrypt? → SENT →
//! RESOLVED(ok) | REJECTED(session-expired | business | transport).

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde_json::Value;

use atrium_crypto::{seal_data_key, BodyCipher, CipherSuite, DataKey, RecipientPublic};

use crate::codes::{self, MSG_NETWORK, MSG_NOT_THIS_SYSTEM, MSG_SESSION_EXPIRED, MSG_TIMEOUT};
use crate::config::ClientConfig;
use crate::context::{
    CredentialStore, FixedLocale, LocaleProvider, MemoryCredentials, Notifier, TracingNotifier,
};
use crate::envelope::{Envelope, PageEnvelope, CODE_OK, CODE_UNAUTHORIZED};
use crate::error::{Error, Result};
use crate::guard::RepeatGuard;
use crate::query;
use crate::request::{ApiRequest, Body, Method};

/// Header carrying the sealed per-request data key.
pub const HEADER_ENCRYPT_KEY: &str = "encrypt-key";
/// Tenant client id header.
pub const HEADER_CLIENT_ID: &str = "clientid";
pub const HEADER_CONTENT_LANGUAGE: &str = "Content-Language";
/// Server-supplied file name on download replies.
pub const HEADER_DOWNLOAD_FILENAME: &str = "download-filename";

const CONTENT_TYPE_JSON: &str = "application/json;charset=utf-8";
const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

pub struct Client {
    cfg: ClientConfig,
    http: reqwest::Client,
    guard: RepeatGuard,
    credentials: Arc<dyn CredentialStore>,
    locale: Arc<dyn LocaleProvider>,
    notifier: Arc<dyn Notifier>,
    seal_to: Option<RecipientPublic>,
}

impl Client {
    pub fn new(cfg: ClientConfig) -> Result<Self> {
        cfg.validate()?;
        let seal_to = cfg
            .encrypt_public_key
            .as_deref()
            .map(RecipientPublic::from_base64)
            .transpose()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()
            .map_err(|e| Error::config(format!("failed to build http client: {e}")))?;
        let locale = Arc::new(FixedLocale(cfg.default_language.clone()));
        Ok(Self {
            cfg,
            http,
            guard: RepeatGuard::new(),
            credentials: Arc::new(MemoryCredentials::anonymous()),
            locale,
            notifier: Arc::new(TracingNotifier),
            seal_to,
        })
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_locale(mut self, locale: Arc<dyn LocaleProvider>) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.cfg
    }

    pub fn guard(&self) -> &RepeatGuard {
        &self.guard
    }

    /// Send a request and deserialize a `{code, data, msg}` envelope.
    pub async fn send<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<Envelope<T>> {
        let value = self.execute_json(req).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Send a request and deserialize a paged `{code, total, rows, msg}`
    /// envelope.
    pub async fn send_page<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<PageEnvelope<T>> {
        let value = self.execute_json(req).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Send a request whose payload the caller does not care about.
    pub async fn send_unit(&self, req: ApiRequest) -> Result<Envelope<Value>> {
        self.send(req).await
    }

    async fn execute_json(&self, req: ApiRequest) -> Result<Value> {
        let resp = self.dispatch(req).await?;
        self.classify(resp).await
    }

    /// Run the outbound hooks and put the request on the wire. Used directly
    /// by the download helpers, which classify the reply differently.
    pub(crate) async fn dispatch(&self, req: ApiRequest) -> Result<reqwest::Response> {
        let builder = self.prepare(req)?;
        match builder.send().await {
            Ok(resp) => Ok(resp),
            Err(e) => {
                let err = transport_error(&e);
                self.notifier.error(&err.user_message());
                Err(err)
            }
        }
    }

    fn prepare(&self, mut req: ApiRequest) -> Result<reqwest::RequestBuilder> {
        let mut url = format!("{}{}", self.cfg.base_url.trim_end_matches('/'), req.path);
        if req.method == Method::Get && !req.params.is_empty() {
            let params = std::mem::take(&mut req.params);
            url = query::append_params(&url, &params);
        }

        let mut builder = self.http.request(req.method.as_reqwest(), url.as_str());
        builder = builder.header(HEADER_CONTENT_LANGUAGE, self.locale.language());
        if !self.cfg.client_id.is_empty() {
            builder = builder.header(HEADER_CLIENT_ID, self.cfg.client_id.clone());
        }
        if req.with_token {
            if let Some(token) = self.credentials.token() {
                builder =
                    builder.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
            }
        }
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if req.method.is_mutating() && req.repeat_submit {
            self.guard.check(&url, &req.fingerprint())?;
        }

        if req.method.is_mutating() && self.cfg.encrypt_requests && req.encrypt {
            return self.encrypt_body(builder, req);
        }

        builder = match req.body {
            None => builder,
            Some(Body::Json(value)) => builder
                .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE_JSON)
                .body(value.to_string()),
            Some(Body::Form(fields)) => builder
                .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE_FORM)
                .body(query::encode_params(&fields)),
            Some(Body::Multipart { fields, files }) => {
                // Leave the content type to the transport so it can supply
                // the multipart boundary.
                let mut form = reqwest::multipart::Form::new();
                for (name, value) in fields {
                    form = form.text(name, value);
                }
                for part in files {
                    let mut p = reqwest::multipart::Part::bytes(part.bytes)
                        .file_name(part.file_name);
                    if let Some(mime) = part.mime.as_deref() {
                        p = p
                            .mime_str(mime)
                            .map_err(|e| Error::protocol(format!("invalid mime type: {e}")))?;
                    }
                    form = form.part(part.name, p);
                }
                builder.multipart(form)
            }
        };
        Ok(builder)
    }

    /// Replace the body with ciphertext and attach the sealed data key.
    /// Fails closed: any crypto error aborts before transmission, there is
    /// no plaintext fallback.
    fn encrypt_body(
        &self,
        builder: reqwest::RequestBuilder,
        mut req: ApiRequest,
    ) -> Result<reqwest::RequestBuilder> {
        let Some(recipient) = self.seal_to.as_ref() else {
            return Err(Error::config(
                "request encryption enabled but encrypt_public_key is not configured",
            ));
        };
        let plaintext = match req.body.take() {
            Some(Body::Json(value)) => value.to_string(),
            Some(Body::Form(fields)) => query::encode_params(&fields),
            Some(Body::Multipart { .. }) => {
                return Err(Error::protocol("multipart bodies cannot be encrypted"))
            }
            None => String::new(),
        };
        let key = DataKey::generate();
        let sealed = seal_data_key(recipient, &key)?;
        let ciphertext = BodyCipher::new(CipherSuite::default(), key).seal(plaintext.as_bytes())?;
        tracing::debug!(path = %req.path, "request body encrypted");
        Ok(builder
            .header(HEADER_ENCRYPT_KEY, sealed)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(BASE64.encode(ciphertext)))
    }

    /// Inbound hooks: business-code classification of a JSON reply.
    async fn classify(&self, resp: reqwest::Response) -> Result<Value> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.transport_failure(status.as_u16(), resp).await);
        }
        let text = resp.text().await.map_err(|e| {
            let err = transport_error(&e);
            self.notifier.error(&err.user_message());
            err
        })?;
        let Ok(value) = serde_json::from_str::<Value>(&text) else {
            self.notifier.error(MSG_NOT_THIS_SYSTEM);
            return Err(Error::protocol(MSG_NOT_THIS_SYSTEM));
        };
        let Some(code) = value.get("code").and_then(Value::as_i64) else {
            self.notifier.error(MSG_NOT_THIS_SYSTEM);
            return Err(Error::protocol(MSG_NOT_THIS_SYSTEM));
        };
        match code {
            CODE_OK => Ok(value),
            CODE_UNAUTHORIZED => {
                tracing::warn!("session expired, invalidating credentials");
                self.credentials.invalidate();
                Err(Error::SessionExpired(MSG_SESSION_EXPIRED.into()))
            }
            other => {
                let msg = value
                    .get("msg")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .unwrap_or("Error")
                    .to_string();
                self.notifier.error(&msg);
                Err(Error::business(other, msg))
            }
        }
    }

    /// Non-2xx without a usable envelope: translate through the static code
    /// table, preferring a server-supplied `msg` when one is present.
    pub(crate) async fn transport_failure(&self, status: u16, resp: reqwest::Response) -> Error {
        let data_msg = resp
            .json::<Value>()
            .await
            .ok()
            .and_then(|v| v.get("msg").and_then(Value::as_str).map(str::to_string))
            .filter(|m| !m.is_empty());
        let msg = data_msg.unwrap_or_else(|| codes::translate(status).to_string());
        self.notifier.error(&msg);
        if status == 401 {
            self.credentials.invalidate();
            return Error::SessionExpired(msg);
        }
        Error::transport(Some(status), msg)
    }

    pub(crate) fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }
}

fn transport_error(e: &reqwest::Error) -> Error {
    let msg = if e.is_timeout() {
        MSG_TIMEOUT
    } else if e.is_connect() {
        MSG_NETWORK
    } else {
        codes::MSG_DEFAULT
    };
    Error::transport(e.status().map(|s| s.as_u16()), msg)
}
