use crate::cli::Args;
use crate::config::prompt;
use crate::error::ChatError;
use crate::history::{
    decode_history,
    encode_history,
    format_history_for_prompt,
    initialize_conversation_store,
    ConversationStore,
};
use crate::llm::chat::{ new_client as new_chat_client, ChatClient };
use crate::llm::{ InferencingParams, LlmConfig, LlmType };
use crate::models::api::Summary;
use crate::models::chat::{ ChatMessage, Conversation };
use crate::transcript;

use log::{ debug, info };
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub system_prompt: String,
    pub chat_params: InferencingParams,
    pub summary_params: InferencingParams,
}

impl AgentSettings {
    pub fn from_args(args: &Args) -> Self {
        Self {
            system_prompt: args.system_prompt.clone(),
            chat_params: InferencingParams { max_tokens: args.max_tokens },
            summary_params: InferencingParams { max_tokens: args.summary_max_tokens },
        }
    }
}

/// Runs the chat workflow against a conversation store and an inference backend.
///
/// Holds no per-conversation state. Two generate calls racing on the same id
/// both read the same history and the later save drops the other's turn.
#[derive(Clone)]
pub struct ChatAgent {
    store: Arc<dyn ConversationStore>,
    chat_client: Arc<dyn ChatClient>,
    settings: AgentSettings,
}

impl ChatAgent {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        chat_client: Arc<dyn ChatClient>,
        settings: AgentSettings
    ) -> Self {
        Self { store, chat_client, settings }
    }

    pub fn from_args(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let chat_llm_type: LlmType = args.chat_llm_type
            .parse()
            .map_err(|e| format!("Invalid chat LLM type: {}", e))?;
        let chat_api_key = if !args.chat_api_key.is_empty() {
            Some(args.chat_api_key.clone())
        } else {
            None
        };
        let chat_config = LlmConfig {
            llm_type: chat_llm_type,
            base_url: args.chat_base_url.clone(),
            api_key: chat_api_key,
            completion_model: args.chat_model.clone(),
            timeout: Some(args.inference_timeout_secs)
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        };
        let chat_client = new_chat_client(&chat_config)?;
        info!(
            "Chat client configured: Type={}, Model={}, BaseURL={}",
            chat_config.llm_type,
            chat_client.get_model(),
            chat_client.get_base_url().as_deref().unwrap_or("adapter default")
        );

        let store = initialize_conversation_store(args)?;
        Ok(Self::new(store, chat_client, AgentSettings::from_args(args)))
    }

    async fn load_or_initialize(&self, id: &str) -> Result<Conversation, ChatError> {
        match self.store.get(id).await {
            Ok(bytes) => decode_history(id, &bytes),
            Err(ChatError::NotFound(_)) => {
                info!("Starting new conversation {}", id);
                Ok(Conversation::new(id, self.settings.system_prompt.clone()))
            }
            Err(e) => Err(e),
        }
    }

    /// Appends the user turn and the model's reply, persists the whole history,
    /// and returns the sanitized reply.
    ///
    /// History is written once, after inference succeeds, so a failed call leaves
    /// the stored conversation untouched. The stored reply is the raw model
    /// output; only the returned copy is sanitized.
    pub async fn generate(&self, id: &str, content: &str) -> Result<String, ChatError> {
        let mut conversation = self.load_or_initialize(id).await?;
        conversation.push(ChatMessage::user(id, content));

        let prompt = transcript::encode(&conversation.messages)?;
        debug!("Sending prompt for {}: {}", id, prompt);
        let result = self.chat_client.infer(&prompt, &self.settings.chat_params).await?;

        conversation.push(ChatMessage::assistant(id, result.text.clone()));
        self.store.set(id, &encode_history(&conversation)?).await?;
        info!("Conversation {} now has {} messages", id, conversation.len());

        Ok(transcript::sanitize(&result.text).to_string())
    }

    /// Returns the stored JSON exactly as persisted.
    pub async fn get_history(&self, id: &str) -> Result<Vec<u8>, ChatError> {
        self.store.get(id).await
    }

    pub async fn get_conversation(&self, id: &str) -> Result<Conversation, ChatError> {
        decode_history(id, &self.get_history(id).await?)
    }

    pub async fn clear(&self, id: &str) -> Result<(), ChatError> {
        if !self.store.exists(id).await? {
            return Err(ChatError::NotFound(id.to_string()));
        }
        self.store.delete(id).await?;
        info!("Cleared conversation {}", id);
        Ok(())
    }

    pub async fn summarize(&self, id: &str) -> Result<Summary, ChatError> {
        let conversation = self.get_conversation(id).await?;
        let prompt = prompt::get_summary_prompt(&format_history_for_prompt(&conversation));
        debug!("Sending summary prompt for {}: {}", id, prompt);
        let result = self.chat_client.infer(&prompt, &self.settings.summary_params).await?;

        Ok(Summary {
            id: id.to_string(),
            summary: transcript::sanitize(&result.text).trim().to_string(),
        })
    }
}
