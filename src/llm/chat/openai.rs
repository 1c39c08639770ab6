use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use serde::{ Deserialize, Serialize };
use std::error::Error as StdError;

use super::{ build_http_client, check_status, ChatClient };
use crate::error::ChatError;
use crate::llm::{ InferencingParams, InferencingResult, LlmConfig };

/// Client for OpenAI-compatible text completion servers (vLLM, llama.cpp, TGI).
///
/// The chat endpoint is not used: it would re-template a prompt that is
/// already a Llama-2 transcript.
pub struct OpenAICompletionClient {
    http: HttpClient,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct CompletionRequest {
    model: String,
    prompt: String,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}

impl OpenAICompletionClient {
    pub fn new(
        http: HttpClient,
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>
    ) -> Self {
        Self {
            http,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.unwrap_or_else(|| "meta-llama/Llama-2-7b-chat-hf".to_string()),
            base_url: base_url.unwrap_or_else(|| "http://localhost:8000/v1".to_string()),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        if config.llm_type != crate::llm::LlmType::OpenAI {
            return Err("Invalid config type for OpenAICompletionClient".into());
        }

        Ok(
            Self::new(
                build_http_client(config)?,
                config.api_key.clone(),
                config.completion_model.clone(),
                config.base_url.clone()
            )
        )
    }

    async fn complete(
        &self,
        prompt: &str,
        params: &InferencingParams
    ) -> Result<CompletionResponse, ChatError> {
        let url = format!("{}/completions", self.base_url.trim_end_matches('/'));
        let req = CompletionRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            max_tokens: params.max_tokens,
        };
        debug!("Completion request to {} (max_tokens={})", url, params.max_tokens);

        let mut builder = self.http.post(&url).json(&req);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let resp = check_status(builder.send().await?).await?;
        Ok(resp.json::<CompletionResponse>().await?)
    }
}

#[async_trait]
impl ChatClient for OpenAICompletionClient {
    async fn infer(
        &self,
        prompt: &str,
        params: &InferencingParams
    ) -> Result<InferencingResult, ChatError> {
        let resp = self.complete(prompt, params).await?;
        let text = resp.choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| {
                ChatError::InferenceUnavailable("completion response had no choices".to_string())
            })?;
        Ok(InferencingResult { text })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}
