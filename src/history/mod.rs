mod memory;
mod redis;
use async_trait::async_trait;
use log::{ info, warn };
use serde::{ Deserialize, Serialize };
use std::error::Error;
use std::sync::Arc;
use crate::cli::Args;
use crate::error::ChatError;
use crate::models::chat::{ ChatMessage, Conversation };

pub use self::memory::MemoryConversationStore;
pub use self::redis::RedisConversationStore;

/// Key/value store holding one serialized conversation per id.
///
/// Writes are whole-value overwrites; concurrent writers for the same id are
/// not coordinated and the last one wins.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn exists(&self, id: &str) -> Result<bool, ChatError>;

    /// Fails with `NotFound` when nothing is stored under `id`.
    async fn get(&self, id: &str) -> Result<Vec<u8>, ChatError>;

    async fn set(&self, id: &str, value: &[u8]) -> Result<(), ChatError>;

    async fn delete(&self, id: &str) -> Result<(), ChatError>;
}

#[derive(Serialize, Deserialize)]
struct StoredPrompt {
    id: String,
    role: String,
    content: String,
}

#[derive(Serialize, Deserialize)]
struct StoredHistory {
    id: String,
    prompts: Vec<StoredPrompt>,
}

pub fn encode_history(conversation: &Conversation) -> Result<Vec<u8>, ChatError> {
    let stored = StoredHistory {
        id: conversation.id.clone(),
        prompts: conversation.messages
            .iter()
            .map(|msg| StoredPrompt {
                id: msg.id.clone(),
                role: msg.role.to_string(),
                content: msg.content.clone(),
            })
            .collect(),
    };
    Ok(serde_json::to_vec(&stored)?)
}

/// Decodes the history stored under `id`. The key is authoritative: a
/// mismatched `id` inside the payload is replaced so the next save repairs it.
/// Rejects stored messages whose role is outside the closed role set.
pub fn decode_history(id: &str, bytes: &[u8]) -> Result<Conversation, ChatError> {
    let stored: StoredHistory = serde_json::from_slice(bytes)?;
    if stored.id != id {
        warn!("Stored conversation under '{}' claims id '{}'; using the key", id, stored.id);
    }
    let messages = stored.prompts
        .into_iter()
        .map(|p| {
            Ok(ChatMessage {
                role: p.role.parse()?,
                id: p.id,
                content: p.content,
            })
        })
        .collect::<Result<Vec<_>, ChatError>>()?;

    Ok(Conversation {
        id: id.to_string(),
        messages,
    })
}

pub fn format_history_for_prompt(conversation: &Conversation) -> String {
    let mut result = String::new();
    for msg in &conversation.messages {
        result.push_str(&format!("{}: {}\n", msg.role, msg.content.trim()));
    }
    result.trim_end().to_string()
}

pub fn create_conversation_store(
    args: &Args
) -> Result<Arc<dyn ConversationStore>, Box<dyn Error + Send + Sync>> {
    match args.history_type.to_lowercase().as_str() {
        "redis" => {
            let store = RedisConversationStore::new(
                &args.history_host,
                args.history_redis_prefix.clone()
            )?;
            Ok(Arc::new(store))
        }
        "memory" => Ok(Arc::new(MemoryConversationStore::new())),
        _ =>
            Err(
                Box::new(
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("Unsupported history store type: {}", args.history_type)
                    )
                )
            ),
    }
}

pub fn initialize_conversation_store(
    args: &Args
) -> Result<Arc<dyn ConversationStore>, Box<dyn Error + Send + Sync>> {
    info!("Chat history will be stored in: {} at {}", args.history_type, args.history_host);
    create_conversation_store(args)
}
