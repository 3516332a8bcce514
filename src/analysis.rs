// analysis.rs - Grouping and aggregation over sale records
//
// Groups are always produced in name order. Ranking puts the highest revenue
// first and breaks ties by the lexicographically smallest name, so "top"
// answers never depend on record order.

use crate::types::Sale;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Aggregate statistics for one product or one region
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub name: String,
    pub count: usize,
    pub total_revenue: f64,
    pub average_revenue: f64,
    pub total_quantity: u32,
}

/// Per-product and per-region tables handed to the language model
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub products: Vec<GroupStats>,
    pub regions: Vec<GroupStats>,
    pub top_product: Option<GroupStats>,
    pub top_region: Option<GroupStats>,
}

impl Breakdown {
    pub fn from_records(records: &[Sale]) -> Self {
        let products = group_by(records, |s| s.product.as_str());
        let regions = group_by(records, |s| s.region.as_str());
        let top_product = top_group(&products).cloned();
        let top_region = top_group(&regions).cloned();

        Self {
            products,
            regions,
            top_product,
            top_region,
        }
    }
}

/// Group records by a string key, in key order
pub fn group_by<F>(records: &[Sale], key: F) -> Vec<GroupStats>
where
    F: Fn(&Sale) -> &str,
{
    let mut groups: BTreeMap<&str, (usize, f64, u32)> = BTreeMap::new();
    for sale in records {
        let entry = groups.entry(key(sale)).or_insert((0, 0.0, 0));
        entry.0 += 1;
        entry.1 += sale.revenue;
        entry.2 += sale.quantity;
    }

    groups
        .into_iter()
        .map(|(name, (count, total_revenue, total_quantity))| GroupStats {
            name: name.to_string(),
            count,
            total_revenue,
            average_revenue: total_revenue / count as f64,
            total_quantity,
        })
        .collect()
}

/// Highest revenue first, then name ascending
pub fn by_revenue_desc(a: &GroupStats, b: &GroupStats) -> Ordering {
    b.total_revenue
        .total_cmp(&a.total_revenue)
        .then_with(|| a.name.cmp(&b.name))
}

/// Groups sorted by [`by_revenue_desc`]
pub fn rank_by_revenue(groups: &[GroupStats]) -> Vec<GroupStats> {
    let mut ranked = groups.to_vec();
    ranked.sort_by(by_revenue_desc);
    ranked
}

pub fn top_group(groups: &[GroupStats]) -> Option<&GroupStats> {
    groups.iter().min_by(|a, b| by_revenue_desc(a, b))
}

/// Distinct values of a key in first-seen order
pub fn distinct<F>(records: &[Sale], key: F) -> Vec<String>
where
    F: Fn(&Sale) -> &str,
{
    let mut seen: Vec<String> = Vec::new();
    for sale in records {
        let value = key(sale);
        if !seen.iter().any(|v| v == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

/// Median revenue, averaging the two middle values for even counts
pub fn median_revenue(records: &[Sale]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }

    let mut revenues: Vec<f64> = records.iter().map(|s| s.revenue).collect();
    revenues.sort_by(|a, b| a.total_cmp(b));

    let mid = revenues.len() / 2;
    if revenues.len() % 2 == 0 {
        Some((revenues[mid - 1] + revenues[mid]) / 2.0)
    } else {
        Some(revenues[mid])
    }
}
