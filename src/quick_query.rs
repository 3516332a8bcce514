// quick_query.rs - Predefined analytical questions
//
// Each query has a natural-language question (sent to the LLM by
// `/quick-query`) and a computed answer built straight from the data.

use crate::analysis::{distinct, group_by, median_revenue, rank_by_revenue};
use crate::types::{Sale, Summary};
use crate::utils::{format_rupees, format_rupees_precise};
use serde::Serialize;
use std::fmt::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    TotalRevenue,
    TopProduct,
    AverageRevenue,
    SalesByRegion,
    TotalSales,
}

impl QueryKind {
    pub const ALL: [QueryKind; 5] = [
        QueryKind::TotalRevenue,
        QueryKind::TopProduct,
        QueryKind::SalesByRegion,
        QueryKind::AverageRevenue,
        QueryKind::TotalSales,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            QueryKind::TotalRevenue => "total_revenue",
            QueryKind::TopProduct => "top_product",
            QueryKind::AverageRevenue => "average_revenue",
            QueryKind::SalesByRegion => "sales_by_region",
            QueryKind::TotalSales => "total_sales",
        }
    }

    /// Question forwarded to the language model
    pub fn question(&self) -> &'static str {
        match self {
            QueryKind::TotalRevenue => "What is the total revenue?",
            QueryKind::TopProduct => "Which product has the highest revenue?",
            QueryKind::AverageRevenue => "What is the average revenue per sale?",
            QueryKind::SalesByRegion => "Show me sales breakdown by region",
            QueryKind::TotalSales => "How many total sales do we have?",
        }
    }

    /// Button label shown in the dashboard transcript
    pub fn label(&self) -> &'static str {
        match self {
            QueryKind::TotalRevenue => "Total Revenue",
            QueryKind::TopProduct => "Top Product",
            QueryKind::AverageRevenue => "Average Revenue",
            QueryKind::SalesByRegion => "Sales by Region",
            QueryKind::TotalSales => "Total Sales Count",
        }
    }

    /// Answer computed directly from the summary, enriched when records are given
    pub fn answer(&self, summary: &Summary, records: Option<&[Sale]>) -> String {
        match records {
            Some(records) => self.detailed_answer(summary, records),
            None => self.basic_answer(summary),
        }
    }

    fn basic_answer(&self, summary: &Summary) -> String {
        match self {
            QueryKind::TotalRevenue => format!(
                "The total revenue across all sales is {}.",
                format_rupees(summary.total_revenue)
            ),
            QueryKind::TopProduct => format!(
                "The top product by revenue is {}, generating {} in total sales.",
                summary.top_product,
                format_rupees(summary.top_product_revenue)
            ),
            QueryKind::AverageRevenue => format!(
                "The average revenue per sale is {}.",
                format_rupees_precise(summary.average_revenue)
            ),
            QueryKind::SalesByRegion => {
                let mut out = String::from("Sales by region:");
                for (region, revenue) in &summary.sales_by_region {
                    let _ = write!(out, "\n• {}: {}", region, format_rupees(*revenue));
                }
                out
            }
            QueryKind::TotalSales => format!(
                "We have recorded {} total sales transactions.",
                summary.total_sales
            ),
        }
    }

    fn detailed_answer(&self, summary: &Summary, records: &[Sale]) -> String {
        match self {
            QueryKind::TotalRevenue => format!(
                "Our total revenue across all {} sales is {}. This includes sales from all products and regions.",
                summary.total_sales,
                format_rupees(summary.total_revenue)
            ),
            QueryKind::TopProduct => {
                let ranked = rank_by_revenue(&group_by(records, |s| s.product.as_str()));
                let Some(top) = ranked.first() else {
                    return "There are no sales recorded yet.".to_string();
                };

                let mut out = format!(
                    "The top product by revenue is **{}** with {} in total sales.",
                    top.name,
                    format_rupees(top.total_revenue)
                );
                if let Some(second) = ranked.get(1) {
                    let _ = write!(
                        out,
                        " This is significantly ahead of the second-best product, {} ({}).",
                        second.name,
                        format_rupees(second.total_revenue)
                    );
                }
                out
            }
            QueryKind::AverageRevenue => {
                let median = median_revenue(records).unwrap_or(0.0);
                format!(
                    "The average revenue per sale is {}, with a median of {}. This means half of our sales are above {}.",
                    format_rupees_precise(summary.average_revenue),
                    format_rupees_precise(median),
                    format_rupees_precise(median)
                )
            }
            QueryKind::SalesByRegion => {
                let ranked = rank_by_revenue(&group_by(records, |s| s.region.as_str()));
                let mut out = String::from("**Sales by Region:**\n\n");
                for region in ranked {
                    let _ = writeln!(
                        out,
                        "• **{}**: {} ({} sales, avg {}/sale)",
                        region.name,
                        format_rupees(region.total_revenue),
                        region.count,
                        format_rupees_precise(region.average_revenue)
                    );
                }
                out
            }
            QueryKind::TotalSales => {
                let products = distinct(records, |s| s.product.as_str()).len();
                let regions = distinct(records, |s| s.region.as_str()).len();
                format!(
                    "We have recorded **{} total sales** transactions across {} different products and {} regions.",
                    summary.total_sales, products, regions
                )
            }
        }
    }
}

impl FromStr for QueryKind {
    type Err = UnknownQuery;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| UnknownQuery(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid query type: {0}")]
pub struct UnknownQuery(pub String);

/// Computed answer for a query identifier, or `None` when it is not recognised
pub fn resolve(query_type: &str, summary: &Summary, records: Option<&[Sale]>) -> Option<String> {
    let kind: QueryKind = query_type.parse().ok()?;
    Some(kind.answer(summary, records))
}
