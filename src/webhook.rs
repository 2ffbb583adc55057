// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error notifications posted to a webhook.
//!
//! Only [`Logger::error`](crate::Logger::error) reaches the notifier. The request runs on a
//! detached thread; when it fails or answers with anything but `204 No Content`, the outcome is
//! logged at FATAL through the regular sinks. That self-log goes through plain dispatch, which
//! has no path back to the notifier.

use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread::JoinHandle;

use serde_json::Value;
use serde_json::json;

use crate::Error;
use crate::ErrorKind;
use crate::Level;
use crate::logger::Dispatcher;

/// The embed color of error notifications.
pub const ERROR_COLOR: u32 = 16711680;

/// The status a webhook answers with on success.
pub const EXPECTED_STATUS: u16 = 204;

/// The answer of a webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub status_text: String,
}

/// An HTTP transport that posts JSON bodies.
///
/// Implementations block until the request completes; the logger runs them off the caller's
/// thread. Timeouts are up to the transport.
pub trait Transport: fmt::Debug + Send + Sync + 'static {
    /// POST `body` to `url` with `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// Return an [`ErrorKind::WebhookFailure`] error when no response was received.
    fn post(&self, url: &str, body: Vec<u8>) -> Result<Response, Error>;
}

impl<T: Transport> From<T> for Box<dyn Transport> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// A [`Transport`] backed by reqwest's blocking client.
///
/// A client is created for every request on the thread that sends it, so the transport is safe
/// to own and drop from inside an async runtime.
#[cfg(feature = "reqwest")]
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    timeout: Option<std::time::Duration>,
}

#[cfg(feature = "reqwest")]
impl ReqwestTransport {
    /// Set the timeout of each request.
    ///
    /// Default to reqwest's blocking client timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(feature = "reqwest")]
impl Transport for ReqwestTransport {
    fn post(&self, url: &str, body: Vec<u8>) -> Result<Response, Error> {
        let failed = |message: &'static str| {
            move |err: reqwest::Error| {
                Error::new(ErrorKind::WebhookFailure, message)
                    .with_context("url", url)
                    .with_source(err)
            }
        };

        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(failed("failed to build http client"))?;

        let response = client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(failed("failed to send webhook request"))?;

        let status = response.status();
        Ok(Response {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        })
    }
}

/// Build the JSON body of an error notification.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let body = logfan::webhook::payload("Failed to connect", None);
/// assert_eq!(body["embeds"][0]["title"], "Error");
/// assert_eq!(body["embeds"][0]["description"], "Failed to connect\n");
/// assert_eq!(body["content"], json!(null));
/// ```
pub fn payload(message: &str, extra: Option<&Value>) -> Value {
    json!({
        "content": null,
        "embeds": [
            {
                "title": "Error",
                "description": description(message, extra),
                "color": ERROR_COLOR,
            }
        ],
        "attachments": [],
    })
}

/// The message followed by the extra payload as a fenced JSON block.
///
/// Only an object with at least one key is rendered; anything else adds nothing after the
/// message line.
pub fn description(message: &str, extra: Option<&Value>) -> String {
    let suffix = match extra {
        Some(value) if value.as_object().is_some_and(|map| !map.is_empty()) => {
            format!("\n```json\n{}\n```", pretty(value))
        }
        _ => String::new(),
    };
    format!("{message}\n{suffix}")
}

fn pretty(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match serde::Serialize::serialize(value, &mut ser) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => value.to_string(),
    }
}

/// Posts error notifications to one URL.
#[derive(Debug)]
pub(crate) struct Webhook {
    url: String,
    transport: Arc<dyn Transport>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl Webhook {
    pub(crate) fn new(url: String, transport: Box<dyn Transport>) -> Self {
        Self {
            url,
            transport: Arc::from(transport),
            pending: Mutex::new(vec![]),
        }
    }

    /// Send a notification without waiting for it.
    ///
    /// Failures are reported through `dispatcher` at FATAL.
    pub(crate) fn notify(&self, dispatcher: &Arc<Dispatcher>, message: &str, extra: Option<&Value>) {
        let body = payload(message, extra).to_string().into_bytes();
        let url = self.url.clone();
        let transport = self.transport.clone();
        let handler = dispatcher.clone();

        let spawned = std::thread::Builder::new()
            .name("logfan-webhook".to_string())
            .spawn(move || {
                let outcome = transport.post(&url, body);
                report(&handler, outcome);
            });

        match spawned {
            Ok(handle) => {
                let mut pending = match self.pending.lock() {
                    Ok(pending) => pending,
                    Err(poisoned) => poisoned.into_inner(),
                };
                pending.retain(|handle| !handle.is_finished());
                pending.push(handle);
            }
            Err(err) => {
                let err = Error::new(ErrorKind::WebhookFailure, "failed to spawn webhook thread")
                    .with_source(err);
                report(dispatcher, Err(err));
            }
        }
    }

    /// Wait for every notification sent so far.
    pub(crate) fn wait(&self) {
        let handles = match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        for handle in handles {
            let _ = handle.join();
        }
    }
}

fn report(dispatcher: &Dispatcher, outcome: Result<Response, Error>) {
    let (message, extra) = match outcome {
        Ok(response) if response.status == EXPECTED_STATUS => return,
        Ok(response) => (
            "Unexpected response",
            json!({"status": response.status, "message": response.status_text}),
        ),
        Err(err) => ("Webhook failed to send", json!({"error": err.to_string()})),
    };

    if let Err(err) = dispatcher.dispatch(Level::Fatal, message, Some(&extra)) {
        dispatcher.trap(&err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_with_object() {
        let extra = json!({"message": "Unexpected error"});
        assert_eq!(
            description("JSON", Some(&extra)),
            "JSON\n\n```json\n{\n    \"message\": \"Unexpected error\"\n}\n```"
        );
    }

    #[test]
    fn test_description_without_structured_extra() {
        assert_eq!(description("boom", None), "boom\n");
        assert_eq!(description("boom", Some(&json!({}))), "boom\n");
        assert_eq!(description("boom", Some(&json!([1, 2]))), "boom\n");
        assert_eq!(description("boom", Some(&json!("text"))), "boom\n");
        assert_eq!(description("boom", Some(&Value::Null)), "boom\n");
    }

    #[test]
    fn test_payload_shape() {
        let body = payload("boom", Some(&json!({"a": 1})));
        assert_eq!(body["content"], Value::Null);
        assert_eq!(body["attachments"], json!([]));
        let embeds = body["embeds"].as_array().unwrap();
        assert_eq!(embeds.len(), 1);
        assert_eq!(embeds[0]["title"], "Error");
        assert_eq!(embeds[0]["color"], 16711680);
        assert!(embeds[0]["description"].as_str().unwrap().starts_with("boom\n\n```json\n"));
    }
}
