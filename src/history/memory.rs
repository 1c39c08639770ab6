use async_trait::async_trait;
use crate::error::ChatError;
use crate::history::ConversationStore;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct MemoryConversationStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for MemoryConversationStore {
    async fn exists(&self, id: &str) -> Result<bool, ChatError> {
        Ok(self.entries.read().await.contains_key(id))
    }

    async fn get(&self, id: &str) -> Result<Vec<u8>, ChatError> {
        self.entries
            .read().await
            .get(id)
            .cloned()
            .ok_or_else(|| ChatError::NotFound(id.to_string()))
    }

    async fn set(&self, id: &str, value: &[u8]) -> Result<(), ChatError> {
        self.entries.write().await.insert(id.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ChatError> {
        self.entries.write().await.remove(id);
        Ok(())
    }
}
