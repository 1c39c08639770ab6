pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::error::Error as StdError;
use std::sync::Arc;
use super::{ InferencingParams, InferencingResult, LlmConfig, LlmType };
use self::ollama::OllamaClient;
use self::openai::OpenAICompletionClient;
use crate::error::ChatError;

/// Inference adapter: one blocking completion per encoded prompt.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn infer(
        &self,
        prompt: &str,
        params: &InferencingParams
    ) -> Result<InferencingResult, ChatError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> Option<String>;
}

pub fn new_client(
    config: &LlmConfig
) -> Result<Arc<dyn ChatClient>, Box<dyn StdError + Send + Sync>> {
    let client: Arc<dyn ChatClient> = match config.llm_type {
        LlmType::Ollama => {
            let specific_client = OllamaClient::from_config(config)?;
            Arc::new(specific_client)
        }
        LlmType::OpenAI => {
            let specific_client = OpenAICompletionClient::from_config(config)?;
            Arc::new(specific_client)
        }
    };
    Ok(client)
}

pub(crate) fn build_http_client(
    config: &LlmConfig
) -> Result<HttpClient, Box<dyn StdError + Send + Sync>> {
    let mut builder = HttpClient::builder();
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

pub(crate) async fn check_status(
    resp: reqwest::Response
) -> Result<reqwest::Response, ChatError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ChatError::InferenceUnavailable(format!("HTTP error: {} {}", status, body.trim())))
}
