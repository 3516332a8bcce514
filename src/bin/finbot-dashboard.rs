use finbot::dashboard::{ChatTranscript, DashboardClient, DashboardCommand, QuickStats, DEFAULT_API_URL};
use finbot::quick_query::QueryKind;
use finbot::sales_data::write_csv;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Commands:
  <question>          ask FinBot anything about the sales data
  /quick <query>      total_revenue | top_product | sales_by_region | average_revenue | total_sales
  /stats              show quick stats
  /prompts            show example questions
  /export [path]      save the sales table as CSV
  /clear              clear the chat
  /quit               leave";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let api_url = std::env::var("FINBOT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let client = DashboardClient::new(api_url);

    println!("💰 FinBot - Sales Assistant");
    println!("Your AI-powered finance and sales analysis companion\n");

    match client.health().await {
        Ok(health) if !health.llm_available => {
            println!("⚠️ FinBot API is up but the LLM is not configured. Questions will fail.");
        }
        Ok(_) => {}
        Err(e) => {
            println!("⚠️ {}", e);
            println!("Please start the backend server with: `cargo run --bin finbot`");
            std::process::exit(1);
        }
    }

    // Fetched once per session
    let sales = client.sales_data().await?;
    let stats = QuickStats::from_summary(&client.summary().await?);
    println!("{}\n", stats);
    println!("{}\n", HELP);

    let mut transcript = ChatTranscript::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match DashboardCommand::parse(&line) {
            DashboardCommand::Empty => continue,
            DashboardCommand::Ask(question) => {
                println!("FinBot is thinking...");
                match client.ask(&question).await {
                    Ok(result) => {
                        transcript.push_exchange(question, result.answer);
                        println!("\n{}\n", transcript.render());
                    }
                    Err(e) => println!("❌ {}", e),
                }
            }
            DashboardCommand::Quick(kind) => {
                println!("Asking FinBot...");
                match client.quick_query(kind).await {
                    Ok(result) => {
                        transcript.push_exchange(kind.label(), result.answer);
                        println!("\n{}\n", transcript.render());
                    }
                    Err(e) => println!("❌ Failed to get response from FinBot: {}", e),
                }
            }
            DashboardCommand::UnknownQuick(name) => {
                let known: Vec<&str> = QueryKind::ALL.iter().map(|k| k.id()).collect();
                println!("Unknown quick query '{}'. Try one of: {}", name, known.join(", "));
            }
            DashboardCommand::Clear => {
                transcript.clear();
                println!("🧹 Chat cleared");
            }
            DashboardCommand::Stats => println!("{}", stats),
            DashboardCommand::Prompts => match client.prompts().await {
                Ok(prompts) => prompts.iter().for_each(|p| println!("  • {}", p)),
                Err(e) => println!("❌ {}", e),
            },
            DashboardCommand::Export(path) => {
                let result = std::fs::File::create(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|file| write_csv(&sales.data, file).map_err(|e| e.to_string()));
                match result {
                    Ok(()) => println!("📥 Saved {} records to {}", sales.data.len(), path),
                    Err(e) => println!("❌ Failed to export CSV: {}", e),
                }
            }
            DashboardCommand::Help => println!("{}", HELP),
            DashboardCommand::Quit => break,
        }
    }

    Ok(())
}
