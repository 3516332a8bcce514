// state.rs - Read-only context shared by every request handler
use crate::assistant::FinBot;
use crate::completion::{CompletionClient, GroqClient};
use crate::config::LlmConfig;
use crate::sales_data::{get_records, summarize};
use crate::types::{Sale, Summary};
use std::sync::Arc;

/// Dataset, summary and optional assistant, built once at startup
pub struct AppContext {
    pub records: Vec<Sale>,
    pub summary: Summary,
    pub finbot: Option<FinBot>,
}

impl AppContext {
    /// Context over an explicit record set. The summary is derived here and never again.
    pub fn new(records: Vec<Sale>, client: Option<Arc<dyn CompletionClient>>) -> Self {
        let summary = summarize(&records);
        Self {
            records,
            summary,
            finbot: client.map(FinBot::new),
        }
    }

    /// Sample dataset with a Groq client when a credential is configured
    pub fn from_config(llm: &LlmConfig) -> Self {
        let client: Option<Arc<dyn CompletionClient>> = match &llm.api_key {
            Some(api_key) => {
                tracing::info!("Initializing completion client ({})...", llm.model);
                Some(Arc::new(GroqClient::from_config(api_key.clone(), llm)))
            }
            None => {
                tracing::warn!("GROQ_API_KEY not found. Question answering endpoints will be disabled.");
                tracing::info!("To enable FinBot, set GROQ_API_KEY or add groq_api_key to config.json");
                None
            }
        };

        Self::new(get_records(), client)
    }

    pub fn llm_available(&self) -> bool {
        self.finbot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_without_credential() {
        let context = AppContext::from_config(&LlmConfig::default());
        assert!(!context.llm_available());
        assert_eq!(context.records.len(), 20);
        assert_eq!(context.summary, summarize(&context.records));
    }

    #[test]
    fn test_context_with_credential() {
        let context = AppContext::from_config(&LlmConfig::with_api_key("gsk_test"));
        assert!(context.llm_available());
    }
}
