//! Streaming chat against a relay
//!
//! ```bash
//! export CHATRELAY_BASE_URL="https://relay.example.com"
//! export CHATRELAY_AUTH_TOKEN="your-token"
//! cargo run --example streaming_chat -- claude "Explain SSE in one paragraph"
//! ```

use std::io::Write;

use chatrelay::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(&TracingConfig::default());

    let mut args = std::env::args().skip(1);
    let provider = args.next().unwrap_or_else(|| "gpt".to_string());
    let prompt = args
        .next()
        .unwrap_or_else(|| "Write a haiku about streams.".to_string());

    let client = ChatClient::builder().provider_name(&provider).build()?;
    let model = match client.provider() {
        ModelProvider::Claude => "claude-3-haiku-20240307",
        ModelProvider::Groq => "llama3-70b-8192",
        ModelProvider::Gpt => "gpt-4o-mini",
    };

    println!("🤖 {provider} / {model}\n");

    let (task, mut events) = client.chat_events(
        vec![
            ChatMessage::system("You are a concise assistant."),
            ChatMessage::user(prompt),
        ],
        ChatOptions::new(model),
    );

    while let Some(event) = events.recv().await {
        match event {
            ChatEvent::CancelHandle(handle) => {
                // Ctrl-C stops the reply and keeps what arrived so far.
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        handle.cancel();
                    }
                });
            }
            ChatEvent::Update { delta, .. } => {
                print!("{delta}");
                std::io::stdout().flush()?;
            }
            ChatEvent::Finish { text } => {
                println!("\n\n✅ {} chars", text.chars().count());
            }
            ChatEvent::Error(e) => eprintln!("\n❌ {e}"),
        }
    }

    let outcome = task.await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
