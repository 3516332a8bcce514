// assistant.rs - FinBot prompt assembly on top of a completion client
use crate::analysis::{Breakdown, GroupStats};
use crate::completion::{CompletionClient, CompletionError};
use crate::types::{Sale, Summary};
use crate::utils::{format_rupees, format_rupees_precise};
use std::fmt::Write;
use std::sync::Arc;

const PERSONA: &str = "You are FinBot, a friendly finance and sales analysis assistant.
Your domain: Finance & Sales Data Analysis
Your style: Concise, professional, data-driven.

Guidelines:
1. Always format currency in Indian Rupees (₹)
2. Provide clear numeric answers with context
3. Keep responses under 100 words unless analysis requires more
4. If asked about non-finance topics, politely redirect: \"I specialize in finance and sales analysis. How can I help with your sales data?\"
5. Be friendly but professional.";

/// Finance assistant that answers questions about the sales dataset
#[derive(Clone)]
pub struct FinBot {
    client: Arc<dyn CompletionClient>,
}

impl FinBot {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Render the prompt, send it, and return the reply verbatim.
    pub async fn answer(
        &self,
        question: &str,
        summary: &Summary,
        records: Option<&[Sale]>,
    ) -> Result<String, CompletionError> {
        let prompt = build_prompt(question, summary, records);
        tracing::debug!("FinBot prompt assembled ({} chars)", prompt.len());
        self.client.complete(&prompt).await
    }

    /// Best-effort variant that folds a failure into the answer text.
    ///
    /// The HTTP layer reports failures as errors and does not use this.
    pub async fn answer_or_apology(
        &self,
        question: &str,
        summary: &Summary,
        records: Option<&[Sale]>,
    ) -> String {
        match self.answer(question, summary, records).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("FinBot completion failed: {}", e);
                format!("I encountered an error: {}. Please try again.", e)
            }
        }
    }
}

/// Fill the FinBot template with the summary, optional breakdown and question
pub fn build_prompt(question: &str, summary: &Summary, records: Option<&[Sale]>) -> String {
    let detailed = records
        .map(|r| render_breakdown(&Breakdown::from_records(r)))
        .unwrap_or_default();

    format!(
        "{persona}

You have access to the following financial dataset summary and detailed breakdown:

=== SUMMARY ===
{summary}
=== DETAILED BREAKDOWN ===
{detailed}
Now, answer the following question from the user:
{question}

Provide a concise, insightful, and data-backed explanation.",
        persona = PERSONA,
        summary = render_summary(summary),
        detailed = detailed,
        question = question.trim(),
    )
}

pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total Revenue: {}", format_rupees(summary.total_revenue));
    let _ = writeln!(out, "Total Sales: {}", summary.total_sales);
    let _ = writeln!(
        out,
        "Average Revenue per Sale: {}",
        format_rupees_precise(summary.average_revenue)
    );
    let _ = writeln!(
        out,
        "Top Product: {} ({})",
        summary.top_product,
        format_rupees(summary.top_product_revenue)
    );
    let _ = writeln!(out, "Sales by Region:");
    for (region, revenue) in &summary.sales_by_region {
        let _ = writeln!(out, "- {}: {}", region, format_rupees(*revenue));
    }
    out
}

pub fn render_breakdown(breakdown: &Breakdown) -> String {
    let mut out = String::from("PRODUCT ANALYSIS:\n");
    for product in &breakdown.products {
        let _ = writeln!(
            out,
            "- {}: {} sales, Total Revenue {}, Avg Revenue/Sale {}, Total Quantity {}",
            product.name,
            product.count,
            format_rupees(product.total_revenue),
            format_rupees_precise(product.average_revenue),
            product.total_quantity
        );
    }

    out.push_str("\nREGION ANALYSIS:\n");
    for region in &breakdown.regions {
        let _ = writeln!(
            out,
            "- {}: {} sales, Total Revenue {}, Avg Revenue/Sale {}",
            region.name,
            region.count,
            format_rupees(region.total_revenue),
            format_rupees_precise(region.average_revenue)
        );
    }

    out.push_str("\nTOP PERFORMERS:\n");
    let _ = writeln!(out, "- Best Product: {}", top_line(breakdown.top_product.as_ref()));
    let _ = writeln!(out, "- Best Region: {}", top_line(breakdown.top_region.as_ref()));
    out
}

fn top_line(group: Option<&GroupStats>) -> String {
    match group {
        Some(g) => format!("{} ({})", g.name, format_rupees(g.total_revenue)),
        None => "n/a".to_string(),
    }
}
