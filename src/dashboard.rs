// dashboard.rs - HTTP client and chat transcript for the FinBot dashboard
use crate::models::{
    AnswerResponse, HealthResponse, PredefinedQueryRequest, PromptsResponse, QueryAnswerResponse,
    QuestionRequest, SalesDataResponse,
};
use crate::quick_query::QueryKind;
use crate::types::Summary;
use crate::utils::{format_rupees, format_rupees_precise};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Cannot connect to FinBot API at {url}: {reason}")]
    Unreachable { url: String, reason: String },
    #[error("Error: {0}")]
    Api(String),
    #[error("Failed to decode FinBot API response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    You,
    FinBot,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::You => write!(f, "You"),
            Speaker::FinBot => write!(f, "FinBot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub sender: Speaker,
    pub message: String,
}

/// Session-local chat history; never persisted
#[derive(Debug, Default, Clone)]
pub struct ChatTranscript {
    turns: Vec<ChatTurn>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sender: Speaker, message: impl Into<String>) {
        self.turns.push(ChatTurn {
            sender,
            message: message.into(),
        });
    }

    /// Record a question and its answer as one exchange
    pub fn push_exchange(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.push(Speaker::You, question);
        self.push(Speaker::FinBot, answer);
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn render(&self) -> String {
        if self.turns.is_empty() {
            return "💬 Start chatting with FinBot!".to_string();
        }
        self.turns
            .iter()
            .map(|turn| match turn.sender {
                Speaker::You => format!("🧑‍💼 You: {}", turn.message),
                Speaker::FinBot => format!("🤖 FinBot: {}", turn.message),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Sidebar figures shown above the chat
#[derive(Debug, Clone, PartialEq)]
pub struct QuickStats {
    pub total_revenue: String,
    pub total_sales: usize,
    pub average_revenue: String,
    pub top_product: String,
}

impl QuickStats {
    pub fn from_summary(summary: &Summary) -> Self {
        Self {
            total_revenue: format_rupees(summary.total_revenue),
            total_sales: summary.total_sales,
            average_revenue: format_rupees_precise(summary.average_revenue),
            top_product: summary.top_product.clone(),
        }
    }
}

impl fmt::Display for QuickStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📊 Quick Stats")?;
        writeln!(f, "  Total Revenue:    {}", self.total_revenue)?;
        writeln!(f, "  Total Sales:      {}", self.total_sales)?;
        writeln!(f, "  Avg Revenue/Sale: {}", self.average_revenue)?;
        write!(f, "  Top Product:      {}", self.top_product)
    }
}

/// One line of dashboard input
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardCommand {
    Ask(String),
    Quick(QueryKind),
    UnknownQuick(String),
    Clear,
    Stats,
    Prompts,
    Export(String),
    Help,
    Quit,
    Empty,
}

impl DashboardCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return DashboardCommand::Empty;
        }
        if !line.starts_with('/') {
            return DashboardCommand::Ask(line.to_string());
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };
        match name {
            "/quick" => match arg.parse::<QueryKind>() {
                Ok(kind) => DashboardCommand::Quick(kind),
                Err(_) => DashboardCommand::UnknownQuick(arg.to_string()),
            },
            "/clear" => DashboardCommand::Clear,
            "/stats" => DashboardCommand::Stats,
            "/prompts" => DashboardCommand::Prompts,
            "/export" if !arg.is_empty() => DashboardCommand::Export(arg.to_string()),
            "/export" => DashboardCommand::Export("sales_data.csv".to_string()),
            "/quit" | "/exit" => DashboardCommand::Quit,
            _ => DashboardCommand::Help,
        }
    }
}

/// Thin client over the FinBot HTTP API
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthResponse, DashboardError> {
        self.get("/").await
    }

    pub async fn sales_data(&self) -> Result<SalesDataResponse, DashboardError> {
        self.get("/sales-data").await
    }

    pub async fn summary(&self) -> Result<Summary, DashboardError> {
        self.get("/summary").await
    }

    pub async fn prompts(&self) -> Result<Vec<String>, DashboardError> {
        let response: PromptsResponse = self.get("/prompts").await?;
        Ok(response.prompts)
    }

    pub async fn ask(&self, question: &str) -> Result<AnswerResponse, DashboardError> {
        let request = QuestionRequest {
            question: question.to_string(),
        };
        self.post("/ask", &request).await
    }

    pub async fn quick_query(&self, kind: QueryKind) -> Result<QueryAnswerResponse, DashboardError> {
        let request = PredefinedQueryRequest {
            query_type: kind.id().to_string(),
        };
        self.post("/quick-query", &request).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DashboardError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(30))
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;
        decode(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, DashboardError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        // LLM round trips can be slow
        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(120))
            .json(body)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;
        decode(response).await
    }

    fn unreachable(&self, e: reqwest::Error) -> DashboardError {
        DashboardError::Unreachable {
            url: self.base_url.clone(),
            reason: e.to_string(),
        }
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, DashboardError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| DashboardError::Decode(e.to_string()))?;

    if !status.is_success() {
        return Err(DashboardError::Api(error_detail(&body)));
    }

    serde_json::from_str(&body).map_err(|e| DashboardError::Decode(e.to_string()))
}

/// Pull `detail` out of an error body, falling back to the raw text
pub fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.trim().to_string()
            }
        })
}
