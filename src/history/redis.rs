use async_trait::async_trait;
use crate::error::ChatError;
use crate::history::ConversationStore;
use redis::{ Client, AsyncCommands };

pub struct RedisConversationStore {
    client: Client,
    key_prefix: String,
}

impl RedisConversationStore {
    pub fn new(host: &str, key_prefix: String) -> Result<Self, ChatError> {
        Ok(Self {
            client: Client::open(host)?,
            key_prefix,
        })
    }

    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    fn key(&self, id: &str) -> String {
        format!("{}{}", self.key_prefix, id)
    }
}

#[async_trait]
impl ConversationStore for RedisConversationStore {
    async fn exists(&self, id: &str) -> Result<bool, ChatError> {
        let mut conn = self.get_connection().await?;
        let found: bool = conn.exists(self.key(id)).await?;
        Ok(found)
    }

    async fn get(&self, id: &str) -> Result<Vec<u8>, ChatError> {
        let mut conn = self.get_connection().await?;
        let value: Option<Vec<u8>> = conn.get(self.key(id)).await?;
        value.ok_or_else(|| ChatError::NotFound(id.to_string()))
    }

    async fn set(&self, id: &str, value: &[u8]) -> Result<(), ChatError> {
        let mut conn = self.get_connection().await?;
        conn.set::<_, _, ()>(self.key(id), value.to_vec()).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ChatError> {
        let mut conn = self.get_connection().await?;
        conn.del::<_, ()>(self.key(id)).await?;
        Ok(())
    }
}
