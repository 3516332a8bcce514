use finbot::{app_router, AppConfig, AppContext};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    let config = AppConfig::load();
    tracing::info!(
        "Configuration - LLM: {}, model: {}",
        if config.llm.is_configured() { "✅" } else { "❌" },
        config.llm.model
    );

    // Dataset and summary are derived once here and shared read-only
    let context = Arc::new(AppContext::from_config(&config.llm));
    tracing::info!(
        "📊 Loaded {} sales records, total revenue {}",
        context.summary.total_sales,
        finbot::utils::format_rupees(context.summary.total_revenue)
    );

    let app = app_router(context);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .expect("Failed to bind listener");
    tracing::info!("listening on {}", listener.local_addr().expect("listener address"));
    axum::serve(listener, app.into_make_service_with_connect_info::<std::net::SocketAddr>())
        .await
        .expect("Server error");
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "debug,finbot=trace,reqwest=info,hyper=info,tower=info".to_string()
        } else {
            "info,finbot=info,reqwest=warn,hyper=warn,tower=warn".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;

    // JSON for log aggregation, human-readable otherwise
    let fmt_layer = if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry().with(env_filter).with(fmt_layer).init();

    tracing::info!("💰 FinBot API starting up...");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Build mode: {}", if cfg!(debug_assertions) { "development" } else { "production" });
    tracing::info!("Log level: {}", log_level);

    Ok(())
}
