//! Chat executor
//!
//! Drives one chat call over HTTP: builds the body through the request
//! transformer, owns the cancel handle and the timeout timer, classifies
//! the opened response, and runs the frame parser and the animator until a
//! terminal outcome is reached.

use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use eventsource_stream::EventStreamError;
use futures_util::StreamExt;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use tokio::time::MissedTickBehavior;

use super::errors::{ErrorClassifier, ResponseDisposition};
use crate::callbacks::ChatCallbacks;
use crate::config::ErrorMessages;
use crate::error::LlmError;
use crate::observability::ProviderTracer;
use crate::streaming::{AnimationConfig, ResponseAnimator, StreamPhase, StreamState};
use crate::transformers::{
    FrameEvent, RequestTransformer, ResponseTransformer, StreamEventParser,
};
use crate::types::{AbortReason, ChatOutcome, ChatRequest, FailureKind};
use crate::utils::{CancelHandle, SseStreamExt};

#[async_trait]
pub trait ChatExecutor: Send + Sync {
    /// Run one call to completion. Never fails: every failure is folded
    /// into the returned outcome and reported through `callbacks`.
    async fn execute(&self, req: &ChatRequest, callbacks: &mut dyn ChatCallbacks) -> ChatOutcome;
}

/// Generic HTTP-based ChatExecutor that wires transformers and HTTP
pub struct HttpChatExecutor {
    pub provider_id: String,
    pub http_client: reqwest::Client,
    pub request_transformer: Arc<dyn RequestTransformer>,
    pub response_transformer: Arc<dyn ResponseTransformer>,
    pub stream_parser: Arc<dyn StreamEventParser>,
    // Strategy hooks
    pub build_url: Box<dyn Fn(bool) -> String + Send + Sync>,
    pub build_headers: Box<dyn Fn(&ChatRequest) -> Result<HeaderMap, LlmError> + Send + Sync>,
    /// Streaming calls are refused locally when this is false
    pub authorized: bool,
    /// Time allowed until the response opens
    pub timeout: Duration,
    pub animation: AnimationConfig,
    pub messages: ErrorMessages,
}

/// How the frame loop ended
enum StreamEnd {
    Done,
    Cancelled,
    Broken(LlmError),
}

/// Terminal bookkeeping for one call. Every exit goes through here so the
/// phase guard decides whether a callback may still fire.
struct CallContext<'a> {
    state: StreamState,
    callbacks: &'a mut dyn ChatCallbacks,
    tracer: ProviderTracer,
}

impl CallContext<'_> {
    fn complete(&mut self) -> ChatOutcome {
        let text = self.flush_if_first(StreamPhase::Finished);
        let outcome = ChatOutcome::Completed {
            text: text.unwrap_or_else(|| self.state.released().to_string()),
        };
        self.tracer.trace_outcome("completed", self.state.released_len());
        outcome
    }

    fn complete_with(&mut self, text: String) -> ChatOutcome {
        if self.state.terminate(StreamPhase::Finished) {
            self.callbacks.on_finish(&text);
        }
        self.tracer.trace_outcome("completed", text.chars().count());
        ChatOutcome::Completed { text }
    }

    fn abort(&mut self, reason: AbortReason) -> ChatOutcome {
        let text = self.flush_if_first(StreamPhase::Aborted);
        let partial_text = text.unwrap_or_else(|| self.state.released().to_string());
        let label = match reason {
            AbortReason::Cancelled => "cancelled",
            AbortReason::TimedOut => "timed_out",
        };
        self.tracer.trace_outcome(label, partial_text.chars().count());
        ChatOutcome::Aborted {
            partial_text,
            reason,
        }
    }

    fn classified(&mut self, outcome: ChatOutcome) -> ChatOutcome {
        let phase = if outcome.is_completed() {
            StreamPhase::Finished
        } else {
            StreamPhase::Errored
        };
        if self.state.terminate(phase)
            && let Some(text) = outcome.text()
        {
            self.callbacks.on_finish(text);
        }
        self.tracer
            .trace_outcome("classified", outcome.text().map_or(0, |t| t.chars().count()));
        outcome
    }

    fn fail(&mut self, error: LlmError) -> ChatOutcome {
        if self.state.terminate(StreamPhase::Errored) {
            self.callbacks.on_error(&error);
        }
        self.tracer.trace_error(&error);
        ChatOutcome::Failed {
            kind: FailureKind::Transport,
            detail: error.to_string(),
        }
    }

    /// Enter `phase`, flush pending text and fire `on_finish`. Returns the
    /// final text only when this was the first terminal transition.
    fn flush_if_first(&mut self, phase: StreamPhase) -> Option<String> {
        if !self.state.terminate(phase) {
            return None;
        }
        self.state.flush();
        let text = self.state.released().to_string();
        self.callbacks.on_finish(&text);
        Some(text)
    }
}

impl HttpChatExecutor {
    async fn read_body(
        response: reqwest::Response,
        handle: &CancelHandle,
    ) -> Option<Result<String, LlmError>> {
        tokio::select! {
            biased;
            _ = handle.cancelled() => None,
            body = response.text() => Some(body.map_err(LlmError::from)),
        }
    }

    async fn run_stream(
        &self,
        response: reqwest::Response,
        handle: &CancelHandle,
        ctx: &mut CallContext<'_>,
    ) -> StreamEnd {
        let animator = ResponseAnimator::new(self.animation);
        let mut ticker = tokio::time::interval(self.animation.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut frames = pin!(response.bytes_stream().into_sse_stream());

        loop {
            tokio::select! {
                biased;
                _ = handle.cancelled() => return StreamEnd::Cancelled,
                _ = ticker.tick() => {
                    if let Some(delta) = animator.tick(&mut ctx.state) {
                        ctx.callbacks.on_update(ctx.state.released(), &delta);
                    }
                }
                frame = frames.next() => match frame {
                    // A close without a terminal frame still counts as done.
                    None => return StreamEnd::Done,
                    Some(Ok(event)) => {
                        ctx.tracer.trace_frame(&event.event, &event.data);
                        match self.stream_parser.parse_frame(&event) {
                            Ok(FrameEvent::Delta(text)) => {
                                ctx.state.push_delta(&text);
                            }
                            Ok(FrameEvent::Finished) => return StreamEnd::Done,
                            Ok(FrameEvent::Ignored) => {}
                            Err(e) => ctx.tracer.trace_malformed_frame(&e, &event.data),
                        }
                    }
                    Some(Err(EventStreamError::Transport(e))) => {
                        return StreamEnd::Broken(LlmError::StreamError(e.to_string()));
                    }
                    Some(Err(e)) => ctx.tracer.trace_malformed_frame(&e, ""),
                },
            }
        }
    }
}

#[async_trait]
impl ChatExecutor for HttpChatExecutor {
    async fn execute(
        &self,
        req: &ChatRequest,
        callbacks: &mut dyn ChatCallbacks,
    ) -> ChatOutcome {
        let streaming = req.stream();
        let mut ctx = CallContext {
            state: StreamState::new(),
            callbacks,
            tracer: ProviderTracer::new(&self.provider_id, &req.config.model),
        };

        let body = match self.request_transformer.transform_chat(req) {
            Ok(body) => body,
            Err(e) => return ctx.fail(e),
        };
        let headers = match (self.build_headers)(req) {
            Ok(headers) => headers,
            Err(e) => return ctx.fail(e),
        };
        let url = (self.build_url)(streaming);

        let handle = CancelHandle::new();
        ctx.callbacks.on_cancel_handle(handle.clone());

        if streaming && !self.authorized {
            return ctx.fail(LlmError::AuthenticationError(
                self.messages.sign_in_required.clone(),
            ));
        }

        ctx.tracer.trace_request_start(&url, streaming);
        ctx.tracer.trace_request_details(&headers, &body);

        let request = self.http_client.post(&url).headers(headers).json(&body);
        let deadline = tokio::time::sleep(self.timeout);
        tokio::pin!(deadline);

        // The deadline only guards the wait for the response to open.
        let response = tokio::select! {
            biased;
            _ = handle.cancelled() => return ctx.abort(AbortReason::Cancelled),
            _ = &mut deadline => {
                handle.cancel();
                return ctx.abort(AbortReason::TimedOut);
            }
            result = request.send() => match result {
                Ok(response) => response,
                Err(e) => return ctx.fail(LlmError::from(e)),
            },
        };

        ctx.state.open();
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        ctx.tracer.trace_response_open(status, content_type.as_deref());

        let classifier = ErrorClassifier::new(&self.messages);
        match ErrorClassifier::classify(status, content_type.as_deref(), streaming) {
            ResponseDisposition::EventStream => {
                ctx.state.start_streaming();
                match self.run_stream(response, &handle, &mut ctx).await {
                    StreamEnd::Done => ctx.complete(),
                    StreamEnd::Cancelled => ctx.abort(AbortReason::Cancelled),
                    StreamEnd::Broken(e) => ctx.fail(e),
                }
            }
            disposition => {
                let body = match Self::read_body(response, &handle).await {
                    None => return ctx.abort(AbortReason::Cancelled),
                    Some(Err(e)) => return ctx.fail(e),
                    Some(Ok(body)) => body,
                };
                match disposition {
                    ResponseDisposition::PlainText => {
                        ctx.classified(classifier.plain_text_outcome(status, &body))
                    }
                    ResponseDisposition::JsonBody => {
                        let extracted = serde_json::from_str::<serde_json::Value>(&body)
                            .map_err(LlmError::from)
                            .and_then(|raw| {
                                self.response_transformer.transform_chat_response(&raw)
                            });
                        match extracted {
                            Ok(text) => ctx.complete_with(text),
                            Err(e) => ctx.fail(e),
                        }
                    }
                    _ => ctx.classified(classifier.unexpected_outcome(status, &body)),
                }
            }
        }
    }
}
