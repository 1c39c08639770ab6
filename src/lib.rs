pub mod agent;
pub mod models;
pub mod server;
pub mod config;
pub mod llm;
pub mod cli;
pub mod history;
pub mod transcript;
pub mod error;

use agent::ChatAgent;
use cli::Args;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub use error::ChatError;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Chat LLM Type: {}", args.chat_llm_type);
    info!("Max Tokens: {}", args.max_tokens);
    info!("Summary Max Tokens: {}", args.summary_max_tokens);
    info!("Inference Timeout (s): {}", args.inference_timeout_secs);
    info!("History Store Type: {}", args.history_type);
    info!("History Store Host: {}", args.history_host);
    info!("Static Dir: {}", args.static_dir.as_deref().unwrap_or("none"));
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let agent = Arc::new(ChatAgent::from_args(&args)?);
    let addr = args.server_addr.clone();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, agent, args);
    server.run().await?;

    Ok(())
}
