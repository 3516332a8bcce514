use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use finbot::completion::{CompletionClient, CompletionError};
use finbot::dashboard::{ChatTranscript, DashboardClient, DashboardError};
use finbot::quick_query::QueryKind;
use finbot::sales_data::get_records;
use finbot::{app_router, AppContext};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Canned completion double that remembers the prompts it saw
struct StubCompletion {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl StubCompletion {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CompletionClient for StubCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(CompletionError::Transport)
    }
}

fn app_with(client: Option<Arc<StubCompletion>>) -> Router {
    let client = client.map(|c| c as Arc<dyn CompletionClient>);
    app_router(Arc::new(AppContext::new(get_records(), client)))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn root_reports_llm_availability() {
    let (status, body) = send(app_with(None), "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["llm_available"], false);

    let (_, body) = send(app_with(Some(StubCompletion::replying("hi"))), "GET", "/", None).await;
    assert_eq!(body["llm_available"], true);
}

#[tokio::test]
async fn sales_data_returns_records_and_summary() {
    let (status, body) = send(app_with(None), "GET", "/sales-data", None).await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 20);
    assert_eq!(data[0]["sale_id"], 1);
    assert_eq!(data[0]["product"], "Laptop");
    assert_eq!(body["summary"]["total_revenue"], 248570.0);
}

#[tokio::test]
async fn summary_endpoint_matches_dataset() {
    let (status, body) = send(app_with(None), "GET", "/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_sales"], 20);
    assert_eq!(body["average_revenue"], 12428.5);
    assert_eq!(body["top_product"], "Laptop");
    assert_eq!(body["top_product_revenue"], 186000.0);

    let by_region = body["sales_by_region"].as_object().unwrap();
    assert_eq!(by_region.len(), 4);
    let region_sum: f64 = by_region.values().map(|v| v.as_f64().unwrap()).sum();
    assert_eq!(region_sum, 248570.0);
}

#[tokio::test]
async fn prompts_lists_examples() {
    let (status, body) = send(app_with(None), "GET", "/prompts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prompts"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn ask_without_credential_is_503() {
    let (status, body) = send(app_with(None), "POST", "/ask", Some(json!({"question": "Total?"}))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["detail"].as_str().unwrap().contains("GROQ_API_KEY"));

    let (status, _) = send(
        app_with(None),
        "POST",
        "/quick-query",
        Some(json!({"query_type": "total_revenue"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn ask_with_blank_question_is_400() {
    let app = app_with(Some(StubCompletion::replying("unused")));
    let (status, body) = send(app.clone(), "POST", "/ask", Some(json!({"question": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Question cannot be empty");

    let (status, _) = send(app, "POST", "/ask", Some(json!({"question": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ask_returns_llm_answer() {
    let stub = StubCompletion::replying("North is the strongest region at ₹118,100.");
    let app = app_with(Some(stub.clone()));

    let (status, body) = send(
        app,
        "POST",
        "/ask",
        Some(json!({"question": "How is our North region performing?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"], "How is our North region performing?");
    assert_eq!(body["answer"], "North is the strongest region at ₹118,100.");
    assert_eq!(body["source"], "llm");

    let prompts = stub.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Total Revenue: ₹248,570"));
    assert!(prompts[0].contains("REGION ANALYSIS"));
    assert!(prompts[0].contains("How is our North region performing?"));
}

#[tokio::test]
async fn upstream_failure_is_500() {
    let app = app_with(Some(StubCompletion::failing("connection refused")));
    let (status, body) = send(app, "POST", "/ask", Some(json!({"question": "Total?"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn quick_query_forwards_mapped_question() {
    let stub = StubCompletion::replying("Laptop leads.");
    let app = app_with(Some(stub.clone()));

    let (status, body) = send(app, "POST", "/quick-query", Some(json!({"query_type": "top_product"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query_type"], "top_product");
    assert_eq!(body["answer"], "Laptop leads.");
    assert_eq!(body["source"], "llm_predefined");

    let prompts = stub.prompts.lock().unwrap();
    assert!(prompts[0].contains("Which product has the highest revenue?"));
}

#[tokio::test]
async fn quick_query_unknown_type_is_400() {
    let stub = StubCompletion::replying("unused");
    let app = app_with(Some(stub.clone()));

    let (status, body) = send(app, "POST", "/quick-query", Some(json!({"query_type": "bogus_id"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid query type: bogus_id");
    assert!(stub.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn quick_answer_works_without_llm() {
    let (status, body) = send(
        app_with(None),
        "POST",
        "/quick-answer",
        Some(json!({"query_type": "total_sales"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "computed");
    assert!(body["answer"].as_str().unwrap().contains("**20 total sales**"));

    let (status, _) = send(
        app_with(None),
        "POST",
        "/quick-answer",
        Some(json!({"query_type": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let response = app_with(None)
        .oneshot(Request::builder().uri("/summary").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

async fn spawn_server(client: Option<Arc<StubCompletion>>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = app_with(client);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn dashboard_client_round_trip() {
    let url = spawn_server(Some(StubCompletion::replying("₹248,570 in total."))).await;
    let client = DashboardClient::new(url);

    let health = client.health().await.unwrap();
    assert!(health.llm_available);

    let sales = client.sales_data().await.unwrap();
    assert_eq!(sales.data.len(), 20);
    assert_eq!(client.summary().await.unwrap(), sales.summary);

    let mut transcript = ChatTranscript::new();
    let answer = client.ask("What is the total revenue?").await.unwrap();
    transcript.push_exchange("What is the total revenue?", answer.answer);

    let quick = client.quick_query(QueryKind::TotalRevenue).await.unwrap();
    transcript.push_exchange(QueryKind::TotalRevenue.label(), quick.answer);
    assert_eq!(transcript.turns().len(), 4);

    let err = client.ask("  ").await.unwrap_err();
    assert!(matches!(err, DashboardError::Api(ref detail) if detail == "Question cannot be empty"));
}

#[tokio::test]
async fn dashboard_client_reports_unreachable_api() {
    let client = DashboardClient::new("http://127.0.0.1:9");
    let err = client.health().await.unwrap_err();
    assert!(matches!(err, DashboardError::Unreachable { .. }));
}
