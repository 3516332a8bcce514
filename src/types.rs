// types.rs - Core data structures shared by the dataset, analysis and API layers
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One transaction line of the sales dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub sale_id: u32,
    pub product: String,
    pub region: String,
    pub revenue: f64,
    pub quantity: u32,
}

impl Sale {
    pub fn new(sale_id: u32, product: &str, region: &str, revenue: f64, quantity: u32) -> Self {
        Self {
            sale_id,
            product: product.to_string(),
            region: region.to_string(),
            revenue,
            quantity,
        }
    }
}

/// Aggregated statistics derived once from the full record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_revenue: f64,
    pub total_sales: usize,
    pub average_revenue: f64,
    pub top_product: String,
    pub top_product_revenue: f64,
    // BTreeMap keeps regions in name order, matching the breakdown tables
    pub sales_by_region: BTreeMap<String, f64>,
    pub products: Vec<String>,
    pub regions: Vec<String>,
}
