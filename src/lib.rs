// lib.rs - FinBot sales analytics service
pub mod analysis;
pub mod assistant;
pub mod completion;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod quick_query;
pub mod sales_data;
pub mod state;
pub mod types;
pub mod utils;

// Re-export commonly used types for convenience
pub use assistant::FinBot;
pub use completion::{CompletionClient, CompletionError, GroqClient};
pub use config::AppConfig;
pub use error::ApiError;
pub use handlers::app_router;
pub use state::AppContext;
pub use types::*;
