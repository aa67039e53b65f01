use async_trait::async_trait;
use rig::{
    agent::Agent,
    client::CompletionClient,
    completion::Prompt,
    providers::{gemini, openrouter},
};
use std::sync::Arc;
use tracing::{error, info};

use crate::config::{LlmConfig, LlmProvider};

/// Capability the classifier depends on: turn a prompt into raw model text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Instruction sent to the model for a single symptom
pub fn classification_prompt(symptom: &str) -> String {
    format!(
        "You are a helpful Medical Assistant. Classify the symptoms below into one of the categories:\n\
         - General\n\
         - Emergency\n\
         - Mental Health\n\
         Symptom: {symptom}\n\
         Respond only with one word: General, Emergency, or Mental Health\n\
         Example: Input: I have fever, Output: General"
    )
}

enum Backend {
    Gemini(Agent<gemini::completion::CompletionModel>),
    OpenRouter(Agent<openrouter::CompletionModel>),
}

/// [`TextGenerator`] backed by a rig agent
pub struct RigGenerator {
    backend: Backend,
    model: String,
}

impl RigGenerator {
    pub fn new(provider: LlmProvider, api_key: &str, model: &str, temperature: f64) -> Self {
        let backend = match provider {
            LlmProvider::Gemini => {
                let client = gemini::Client::new(api_key);
                Backend::Gemini(client.agent(model).temperature(temperature).build())
            }
            LlmProvider::OpenRouter => {
                let client = openrouter::Client::new(api_key);
                Backend::OpenRouter(client.agent(model).temperature(temperature).build())
            }
        };

        Self {
            backend,
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for RigGenerator {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let response = match &self.backend {
            Backend::Gemini(agent) => agent.prompt(prompt).await?,
            Backend::OpenRouter(agent) => agent.prompt(prompt).await?,
        };
        Ok(response)
    }
}

/// Build the configured generator, or `None` when no credential is available
pub fn build_generator(config: &LlmConfig) -> Option<Arc<dyn TextGenerator>> {
    let Some(api_key) = config.api_key.as_deref() else {
        error!(
            provider = ?config.provider,
            "{} not set, symptom classification will fail until it is configured",
            config.provider.api_key_var()
        );
        return None;
    };

    let generator = RigGenerator::new(config.provider, api_key, &config.model, config.temperature);
    info!(
        provider = ?config.provider,
        model = %generator.model(),
        "LLM adapter initialized"
    );
    Some(Arc::new(generator))
}
