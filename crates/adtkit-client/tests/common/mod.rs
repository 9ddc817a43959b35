//! Shared test support: an in-memory transport that records every request
//! and answers from a script.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use adtkit_client::{AdtClient, AdtClientConfig, LockFailurePolicy};
use adtkit_transport::{HttpRequest, RawResponse, Transport, TransportError, TransportResult};
use parking_lot::Mutex;

pub const HOST: &str = "http://sap.test:50000";
pub const TOKEN: &str = "TOKEN-1234==";

/// What the recording transport answers with next.
#[derive(Debug)]
pub enum Scripted {
    Respond(RawResponse),
    Fail(TransportError),
}

#[derive(Debug, Default)]
struct Inner {
    script: VecDeque<Scripted>,
    requests: Vec<HttpRequest>,
}

/// Records requests and answers them in order. An exhausted script answers
/// `200` with an empty body.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, response: RawResponse) -> &Self {
        self.inner.lock().script.push_back(Scripted::Respond(response));
        self
    }

    pub fn respond_status(&self, status: u16, body: &str) -> &Self {
        self.respond(RawResponse::new(status, body))
    }

    pub fn fail(&self, error: TransportError) -> &Self {
        self.inner.lock().script.push_back(Scripted::Fail(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().requests.len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.inner
            .lock()
            .requests
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

impl Transport for RecordingTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<RawResponse>> + Send + '_>> {
        let next = {
            let mut inner = self.inner.lock();
            inner.requests.push(request);
            inner.script.pop_front()
        };
        Box::pin(async move {
            match next {
                Some(Scripted::Respond(response)) => Ok(response),
                Some(Scripted::Fail(error)) => Err(error),
                None => Ok(RawResponse::new(200, "")),
            }
        })
    }

    fn endpoint(&self) -> Option<String> {
        Some(HOST.to_string())
    }
}

/// A client over a fresh recording transport.
pub fn client() -> (AdtClient<RecordingTransport>, RecordingTransport) {
    client_with_policy(LockFailurePolicy::KeepStateful)
}

pub fn client_with_policy(
    policy: LockFailurePolicy,
) -> (AdtClient<RecordingTransport>, RecordingTransport) {
    let transport = RecordingTransport::new();
    let mut config = AdtClientConfig::new(HOST);
    config.username = "DEVELOPER".to_string();
    config.lock_failure_policy = policy;
    (AdtClient::with_config(transport.clone(), config), transport)
}

/// A client that already holds [`TOKEN`].
pub async fn logged_in_client() -> (AdtClient<RecordingTransport>, RecordingTransport) {
    let (mut client, transport) = client();
    transport.respond(login_ok());
    client.login().await.expect("login");
    (client, transport)
}

pub fn login_ok() -> RawResponse {
    RawResponse::new(200, "").with_header("x-csrf-token", TOKEN)
}

pub fn lock_ok(handle: &str) -> RawResponse {
    RawResponse::new(
        200,
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?><asx:abap xmlns:asx="http://www.sap.com/abapxml" version="1.0"><asx:values><DATA><LOCK_HANDLE>{handle}</LOCK_HANDLE></DATA></asx:values></asx:abap>"#
        ),
    )
}

pub fn activation(activation: &str, generation: &str) -> RawResponse {
    RawResponse::new(
        200,
        format!(
            r#"<chkl:messages xmlns:chkl="http://www.sap.com/abapxml/checklist"><chkl:properties activationExecuted="{activation}" generationExecuted="{generation}"/></chkl:messages>"#
        ),
    )
}
