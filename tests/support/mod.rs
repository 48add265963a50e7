//! Shared helpers for integration tests
#![allow(dead_code)]

pub mod stream_fixture;

use std::time::Duration;

use chatrelay::prelude::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::{MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";

/// Records every callback; optionally cancels the call after a delay.
#[derive(Debug, Default)]
pub struct RecordingCallbacks {
    pub updates: Vec<(String, String)>,
    pub finishes: Vec<String>,
    pub errors: Vec<LlmError>,
    pub handle: Option<CancelHandle>,
    cancel_after: Option<Duration>,
}

impl RecordingCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel_after(delay: Duration) -> Self {
        Self {
            cancel_after: Some(delay),
            ..Self::default()
        }
    }

    /// Concatenation of every released chunk
    pub fn released(&self) -> String {
        self.updates.iter().map(|(_, delta)| delta.as_str()).collect()
    }

    /// Every update reports the running total, ending in its own delta.
    pub fn assert_updates_consistent(&self) {
        let mut total = String::new();
        for (full, delta) in &self.updates {
            total.push_str(delta);
            assert_eq!(full, &total);
        }
    }
}

impl ChatCallbacks for RecordingCallbacks {
    fn on_update(&mut self, full_text: &str, delta: &str) {
        self.updates.push((full_text.to_string(), delta.to_string()));
    }

    fn on_finish(&mut self, text: &str) {
        self.finishes.push(text.to_string());
    }

    fn on_error(&mut self, error: &LlmError) {
        self.errors.push(error.clone());
    }

    fn on_cancel_handle(&mut self, handle: CancelHandle) {
        if let Some(delay) = self.cancel_after {
            let handle = handle.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                handle.cancel();
            });
        }
        self.handle = Some(handle);
    }
}

/// Fast animation so tests do not wait on the 16 ms tick
pub fn fast_animation() -> AnimationConfig {
    AnimationConfig {
        tick: Duration::from_millis(1),
        ..AnimationConfig::default()
    }
}

/// Builder pointed at the mock server with a valid token
pub fn builder_for(server: &MockServer, provider: ModelProvider) -> ChatClientBuilder {
    ChatClient::builder()
        .provider(provider)
        .access(AccessConfig::new(server.uri()))
        .auth_token(TEST_TOKEN)
        .animation(fast_animation())
}

pub fn client_for(server: &MockServer, provider: ModelProvider) -> ChatClient {
    builder_for(server, provider).build().expect("client builds")
}

/// 200 `text/event-stream` response with the given body
pub fn sse(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/event-stream")
}

/// One-shot SSE server that writes each chunk after its delay.
///
/// wiremock sends the whole body at once, so tests that need frames to
/// arrive over time use this instead. Returns the base URL.
pub async fn paced_sse_server(chunks: Vec<(Duration, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut request = vec![0u8; 16 * 1024];
        let _ = socket.read(&mut request).await;

        let head = "HTTP/1.1 200 OK\r\n\
                    content-type: text/event-stream\r\n\
                    transfer-encoding: chunked\r\n\
                    \r\n";
        if socket.write_all(head.as_bytes()).await.is_err() {
            return;
        }
        for (delay, chunk) in chunks {
            tokio::time::sleep(delay).await;
            let framed = format!("{:x}\r\n{chunk}\r\n", chunk.len());
            if socket.write_all(framed.as_bytes()).await.is_err() {
                return;
            }
        }
        let _ = socket.write_all(b"0\r\n\r\n").await;
    });

    format!("http://{addr}")
}
