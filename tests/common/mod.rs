#![allow(dead_code)]

use async_trait::async_trait;
use llama_chat::agent::{ AgentSettings, ChatAgent };
use llama_chat::error::ChatError;
use llama_chat::history::{ ConversationStore, MemoryConversationStore };
use llama_chat::llm::chat::ChatClient;
use llama_chat::llm::{ InferencingParams, InferencingResult };
use std::collections::VecDeque;
use std::sync::{ Arc, Mutex };

pub const SYSTEM_PROMPT: &str = "Be concise.";

/// Chat client double that replays scripted replies and records every prompt.
#[derive(Default)]
pub struct ScriptedChatClient {
    replies: Mutex<VecDeque<Result<String, ChatError>>>,
    calls: Mutex<Vec<(String, InferencingParams)>>,
}

impl ScriptedChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, err: ChatError) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<(String, InferencingParams)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedChatClient {
    async fn infer(
        &self,
        prompt: &str,
        params: &InferencingParams
    ) -> Result<InferencingResult, ChatError> {
        self.calls.lock().unwrap().push((prompt.to_string(), *params));
        let next = self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ChatError::InferenceUnavailable("no scripted reply".into())));
        next.map(|text| InferencingResult { text })
    }

    fn get_model(&self) -> String {
        "scripted".to_string()
    }

    fn get_base_url(&self) -> Option<String> {
        None
    }
}

/// Store double whose every operation fails as an unreachable backend would.
pub struct UnavailableStore;

#[async_trait]
impl ConversationStore for UnavailableStore {
    async fn exists(&self, _id: &str) -> Result<bool, ChatError> {
        Err(ChatError::StoreUnavailable("connection refused".into()))
    }

    async fn get(&self, _id: &str) -> Result<Vec<u8>, ChatError> {
        Err(ChatError::StoreUnavailable("connection refused".into()))
    }

    async fn set(&self, _id: &str, _value: &[u8]) -> Result<(), ChatError> {
        Err(ChatError::StoreUnavailable("connection refused".into()))
    }

    async fn delete(&self, _id: &str) -> Result<(), ChatError> {
        Err(ChatError::StoreUnavailable("connection refused".into()))
    }
}

/// Store double that still reports the id as present while its value is
/// already gone, as after a clear racing between the two lookups.
#[derive(Default)]
pub struct VanishingStore {
    pub inner: MemoryConversationStore,
}

#[async_trait]
impl ConversationStore for VanishingStore {
    async fn exists(&self, _id: &str) -> Result<bool, ChatError> {
        Ok(true)
    }

    async fn get(&self, id: &str) -> Result<Vec<u8>, ChatError> {
        self.inner.get(id).await
    }

    async fn set(&self, id: &str, value: &[u8]) -> Result<(), ChatError> {
        self.inner.set(id, value).await
    }

    async fn delete(&self, id: &str) -> Result<(), ChatError> {
        self.inner.delete(id).await
    }
}

pub fn settings() -> AgentSettings {
    AgentSettings {
        system_prompt: SYSTEM_PROMPT.to_string(),
        chat_params: InferencingParams { max_tokens: 50 },
        summary_params: InferencingParams { max_tokens: 24 },
    }
}

pub struct TestEnv {
    pub store: Arc<MemoryConversationStore>,
    pub client: Arc<ScriptedChatClient>,
    pub agent: Arc<ChatAgent>,
}

pub fn setup_test_env(client: ScriptedChatClient) -> TestEnv {
    let store = Arc::new(MemoryConversationStore::new());
    let client = Arc::new(client);
    let agent = Arc::new(ChatAgent::new(store.clone(), client.clone(), settings()));
    TestEnv { store, client, agent }
}
