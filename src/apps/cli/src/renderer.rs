use agentchat_core::{Message, MessageRole, RenderIntent, RenderSink};
use chrono::Local;
use log::debug;
use serde_json::Value;
use std::io::Write;

const ARGS_SUMMARY_WIDTH: usize = 30;

/// Applies render intents to a line-oriented terminal transcript.
///
/// A terminal cannot mutate lines it already printed, so removals and
/// replacements show up as markers; the canonical transcript state stays
/// with the engine.
pub struct LineRenderer {
    /// Id of the message currently streaming inline, if any.
    streaming: Option<String>,
}

impl LineRenderer {
    pub fn new() -> Self {
        Self { streaming: None }
    }

    /// Visual break for a fresh session (`/new`).
    pub fn clear(&mut self) {
        self.finish_stream();
        println!("\n────────────────────────────────");
    }

    fn timestamp() -> String {
        Local::now().format("%H:%M:%S").to_string()
    }

    /// Close the inline token run, if one is open.
    fn finish_stream(&mut self) {
        if self.streaming.take().is_some() {
            println!();
        }
    }

    fn print_header(role: MessageRole) {
        let author = match role {
            MessageRole::User => "You",
            MessageRole::Agent => "Agent",
        };
        println!("{} · {}", author, Self::timestamp());
    }

    fn print_text_message(&mut self, message: &Message) {
        let Some(text) = message.text() else { return };
        Self::print_header(message.role);
        match &message.message_id {
            Some(id) => {
                // Streaming message: keep the line open for tokens.
                print!("{}", text);
                let _ = std::io::stdout().flush();
                self.streaming = Some(id.clone());
            }
            None => println!("{}\n", text),
        }
    }

    fn print_tool_card(message: &Message) {
        let Some(card) = message.tool_card() else { return };
        let name = card
            .tool_call
            .as_ref()
            .map(|call| call.name.as_str())
            .unwrap_or("tool");

        println!("┌ 🔧 {}  {}", name, args_summary(card.tool_call.as_ref().map(|c| &c.args)));
        if let Some(call) = &card.tool_call {
            print_block("│ input  ", &format_value(&call.args));
        }
        for output in &card.tool_output {
            print_block("│ output ", &format_value(&output.content));
        }
        println!("└");
    }
}

impl RenderSink for LineRenderer {
    fn apply(&mut self, intent: RenderIntent) {
        match intent {
            RenderIntent::CreateMessage { message } => {
                self.finish_stream();
                if message.tool_card().is_some() {
                    Self::print_tool_card(&message);
                } else {
                    self.print_text_message(&message);
                }
            }
            RenderIntent::AppendText { message_id, token } => {
                if self.streaming.as_deref() == Some(message_id.as_str()) {
                    print!("{}", token);
                    let _ = std::io::stdout().flush();
                } else {
                    // An interleaved id resumed; reopen it on a new line.
                    self.finish_stream();
                    Self::print_header(MessageRole::Agent);
                    print!("{}", token);
                    let _ = std::io::stdout().flush();
                    self.streaming = Some(message_id);
                }
            }
            RenderIntent::ReplaceMessage { message_id, message } => {
                self.finish_stream();
                debug!("Replacing message {}", message_id);
                println!("(updated)");
                if message.tool_card().is_some() {
                    Self::print_tool_card(&message);
                } else {
                    self.print_text_message(&message);
                }
            }
            RenderIntent::RemoveMessage { message_id } => {
                // Printed lines cannot be unprinted; the superseding tool
                // card follows immediately.
                debug!("Message {} superseded", message_id);
                self.finish_stream();
            }
            RenderIntent::Pause { payload } => {
                self.finish_stream();
                println!("\n⏸ The agent paused for your decision:");
                print_block("  ", &format_value(&payload));
            }
            RenderIntent::ResumeReady => {
                self.finish_stream();
            }
        }
    }
}

/// Short one-line description of the invocation arguments, in the shape
/// `first_key: first_value…` with a count of the remainder.
fn args_summary(args: Option<&Value>) -> String {
    let Some(Value::Object(map)) = args else {
        return String::new();
    };
    let Some((key, value)) = map.iter().next() else {
        return String::new();
    };
    let mut rendered = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if rendered.len() > ARGS_SUMMARY_WIDTH {
        rendered = format!("{}…", truncated(&rendered, ARGS_SUMMARY_WIDTH));
    }
    if map.len() > 1 {
        format!("{}: {} (+{} more)", key, rendered, map.len() - 1)
    } else {
        format!("{}: {}", key, rendered)
    }
}

fn truncated(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Literal text stays as-is; structured values are pretty-printed.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

fn print_block(prefix: &str, body: &str) {
    for line in body.lines() {
        println!("{}{}", prefix, line);
    }
}
