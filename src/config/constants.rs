//! Protocol and pacing constants

use std::time::Duration;

/// Time allowed for the response to open before the call is cancelled.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(60_000);

/// OpenAI-compatible chat path, relative to the endpoint base.
pub const OPENAI_CHAT_PATH: &str = "v1/chat/completions";

/// Anthropic-compatible messages path, relative to the endpoint base.
pub const ANTHROPIC_CHAT_PATH: &str = "v1/messages";

/// Lower bound applied to `max_tokens` so vision replies are not cut short.
pub const MIN_MAX_TOKENS: u32 = 1024;

/// Upper bound accepted for `max_tokens`.
pub const MAX_MAX_TOKENS: u32 = 512_000;

/// Model-name prefix routed to the OpenAI upstream.
pub const OPENAI_MODEL_PREFIX: &str = "gpt";

/// Header carrying the upstream routing code.
pub const PROVIDER_HEADER: &str = "X-Provider-Code";

/// Content type of a healthy streaming response.
pub const EVENT_STREAM_CONTENT_TYPE: &str = "text/event-stream";

/// Content type the relay uses for its own auth/billing notices.
pub const PLAIN_TEXT_CONTENT_TYPE: &str = "text/plain";

/// Terminal sentinel of the OpenAI event grammar.
pub const DONE_MARKER: &str = "[DONE]";

/// Animator releases `max(1, round(pending / ANIMATION_DIVISOR))` chars per tick.
pub const ANIMATION_DIVISOR: usize = 60;

/// One animation frame.
pub const ANIMATION_TICK: Duration = Duration::from_millis(16);

/// Environment variable holding the relay endpoint.
pub const ENV_BASE_URL: &str = "CHATRELAY_BASE_URL";

/// Environment variable holding the relay access token.
pub const ENV_AUTH_TOKEN: &str = "CHATRELAY_AUTH_TOKEN";
