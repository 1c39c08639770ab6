use clap::Parser;
use crate::config::prompt::DEFAULT_SYSTEM_PROMPT;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- History Store Args ---
    /// Conversation store type (redis, memory)
    #[arg(long, env = "HISTORY_TYPE", default_value = "redis")]
    pub history_type: String,

    /// Conversation store host endpoint (e.g., redis://127.0.0.1:6379)
    #[arg(long, env = "HISTORY_HOST", default_value = "redis://127.0.0.1:6379")]
    pub history_host: String,

    /// Prefix for Redis conversation keys. Empty stores each conversation under its bare id.
    #[arg(long, env = "HISTORY_REDIS_PREFIX", default_value = "")]
    pub history_redis_prefix: String,

    // --- Chat LLM Provider Args ---
    /// Type of inference backend (ollama, openai)
    #[arg(long, env = "CHAT_LLM_TYPE", default_value = "ollama")]
    pub chat_llm_type: String,

    /// Base URL for the inference backend (e.g., http://localhost:11434 for Ollama)
    #[arg(long, env = "CHAT_BASE_URL")] // No default, let adapters handle defaults if None
    pub chat_base_url: Option<String>,

    /// API Key for the inference backend, sent as a bearer token when set
    #[arg(long, env = "CHAT_API_KEY", default_value = "")]
    pub chat_api_key: String,

    /// Model name for completion (e.g., llama2:7b-chat)
    #[arg(long, env = "CHAT_MODEL")] // No default, rely on adapter defaults if None
    pub chat_model: Option<String>,

    /// Maximum number of tokens generated per chat reply.
    #[arg(long, env = "MAX_TOKENS", default_value = "50")]
    pub max_tokens: u32,

    /// Maximum number of tokens generated per conversation summary.
    #[arg(long, env = "SUMMARY_MAX_TOKENS", default_value = "50")]
    pub summary_max_tokens: u32,

    /// HTTP timeout in seconds for a single inference call. 0 disables the timeout.
    #[arg(long, env = "INFERENCE_TIMEOUT_SECS", default_value = "120")]
    pub inference_timeout_secs: u64,

    /// System instruction seeded at the start of every new conversation.
    #[arg(long, env = "SYSTEM_PROMPT", default_value = DEFAULT_SYSTEM_PROMPT)]
    pub system_prompt: String,

    // --- General App Args ---
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:3000")]
    pub server_addr: String,

    /// Optional directory of static files (the chat UI) served for unmatched routes.
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<String>,

    /// Optional path to the TLS certificate file (PEM format) for enabling HTTPS. Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format) for enabling HTTPS. Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}
