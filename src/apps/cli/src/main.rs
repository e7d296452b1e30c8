// AgentChat CLI - line-mode chat against an agent backend

mod renderer;

use agentchat_core::{SendOptions, SessionController, TurnPhase};
use agentchat_core_types::{AgentRequest, DecisionType};
use agentchat_transport::AgentClient;
use anyhow::Result;
use clap::Parser;
use log::{debug, warn};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use uuid::Uuid;

use renderer::LineRenderer;

#[derive(Debug, Parser)]
#[command(name = "agentchat-cli", version, about = "Chat with an agent backend over SSE")]
struct Cli {
    /// Base URL of the agent backend
    #[arg(long, default_value = "http://localhost:7869")]
    base_url: String,

    /// Let the agent search the internet
    #[arg(long)]
    internet_search: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let client = AgentClient::new(cli.base_url);
    let mut controller = SessionController::new();
    let mut renderer = LineRenderer::new();
    let mut options = SendOptions {
        internet_search: cli.internet_search,
    };
    let mut session_id = Uuid::new_v4().to_string();

    println!("AgentChat {} — backend {}", agentchat_core::VERSION, client.base_url());
    println!("Session {}", session_id);
    println!("Commands: /new, /search on|off, /quit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/new" => {
                session_id = Uuid::new_v4().to_string();
                renderer.clear();
                println!("Session {}", session_id);
            }
            "/search on" => {
                options.internet_search = true;
                println!("Internet search enabled");
            }
            "/search off" => {
                options.internet_search = false;
                println!("Internet search disabled");
            }
            query => {
                run_turn(
                    &client,
                    &mut controller,
                    &mut renderer,
                    &mut lines,
                    query,
                    &session_id,
                    &options,
                )
                .await?;
            }
        }
    }

    Ok(())
}

/// Drive one turn end to end: open it, stream the response, and walk the
/// interrupt/resume loop until the controller is idle again.
async fn run_turn(
    client: &AgentClient,
    controller: &mut SessionController,
    renderer: &mut LineRenderer,
    lines: &mut Lines<BufReader<Stdin>>,
    query: &str,
    session_id: &str,
    options: &SendOptions,
) -> Result<()> {
    let request = match controller.start_turn(query, session_id, options, renderer) {
        Ok(request) => request,
        Err(e) => {
            debug!("Turn not opened: {}", e);
            return Ok(());
        }
    };
    drive_stream(client, controller, renderer, &request).await;

    while controller.phase() == TurnPhase::Paused {
        let Some(decision) = prompt_decision(lines).await? else {
            // stdin closed mid-interrupt; leave the turn paused.
            return Ok(());
        };
        let request = match controller.submit_decision(decision, session_id) {
            Ok(request) => request,
            Err(e) => {
                warn!("Decision rejected: {}", e);
                return Ok(());
            }
        };
        drive_stream(client, controller, renderer, &request).await;
    }

    Ok(())
}

/// Send one request and feed every decoded event to the controller.
async fn drive_stream(
    client: &AgentClient,
    controller: &mut SessionController,
    renderer: &mut LineRenderer,
    request: &AgentRequest,
) {
    match client.agent_chat(request).await {
        Ok(mut rx) => {
            controller.on_stream_start();
            while let Some(item) = rx.recv().await {
                match item {
                    Ok(event) => controller.on_event(&event, renderer),
                    Err(e) => {
                        controller.on_stream_error(&e.to_string(), renderer);
                        return;
                    }
                }
            }
            controller.on_stream_end(renderer);
        }
        Err(e) => controller.on_stream_error(&e.to_string(), renderer),
    }
}

async fn prompt_decision(lines: &mut Lines<BufReader<Stdin>>) -> Result<Option<DecisionType>> {
    loop {
        println!("Approve or reject? [a/r]");
        let Some(answer) = lines.next_line().await? else {
            return Ok(None);
        };
        match answer.trim().to_lowercase().as_str() {
            "a" | "approve" | "y" | "yes" => return Ok(Some(DecisionType::Approve)),
            "r" | "reject" | "n" | "no" => return Ok(Some(DecisionType::Reject)),
            other => println!("Unrecognized decision {:?}", other),
        }
    }
}
