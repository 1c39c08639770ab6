use reqwest::Client as HttpClient;
use serde::{ Deserialize, Serialize };
use async_trait::async_trait;
use std::error::Error as StdError;
use super::{ build_http_client, check_status, ChatClient };
use crate::error::ChatError;
use crate::llm::{ InferencingParams, InferencingResult, LlmConfig };
use log::debug;

#[derive(Debug)]
pub struct OllamaClient {
    http: HttpClient,
    base_url: String,
    completion_model: String,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    raw: bool,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
}

#[derive(Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

impl OllamaClient {
    pub fn new(
        http: HttpClient,
        base_url: Option<String>,
        completion_model: Option<String>
    ) -> Self {
        let model = completion_model.unwrap_or_else(|| "llama2:7b-chat".to_string());
        let url = base_url.unwrap_or_else(|| "http://localhost:11434".into());

        Self {
            http,
            base_url: url,
            completion_model: model,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        if config.llm_type != crate::llm::LlmType::Ollama {
            return Err("Invalid config type for OllamaClient".into());
        }

        Ok(
            Self::new(
                build_http_client(config)?,
                config.base_url.clone(),
                config.completion_model.clone()
            )
        )
    }

    /// Raw mode: the prompt is already in the model's chat template.
    pub async fn generate(
        &self,
        prompt: &str,
        params: &InferencingParams
    ) -> Result<GenerateResponse, ChatError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        let req = GenerateRequest {
            model: self.completion_model.clone(),
            prompt: prompt.to_string(),
            raw: true,
            stream: false,
            options: GenerateOptions { num_predict: params.max_tokens },
        };
        debug!("Ollama generate request to {} (num_predict={})", url, params.max_tokens);
        let resp = check_status(self.http.post(&url).json(&req).send().await?).await?;
        let data = resp.json::<GenerateResponse>().await?;
        Ok(data)
    }
}

#[async_trait]
impl ChatClient for OllamaClient {
    async fn infer(
        &self,
        prompt: &str,
        params: &InferencingParams
    ) -> Result<InferencingResult, ChatError> {
        let gen_resp = self.generate(prompt, params).await?;
        Ok(InferencingResult { text: gen_resp.response })
    }

    fn get_model(&self) -> String {
        self.completion_model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}
