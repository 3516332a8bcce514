// sales_data.rs - Fixed sales dataset and summary statistics
use crate::analysis::{distinct, group_by, top_group};
use crate::types::{Sale, Summary};
use std::io::Write;

const PRODUCTS: [&str; 20] = [
    "Laptop", "Mouse", "Keyboard", "Monitor", "Laptop",
    "Headphones", "Mouse", "Keyboard", "Monitor", "Laptop",
    "USB Cable", "Headphones", "Monitor", "Keyboard", "Mouse",
    "Laptop", "Headphones", "USB Cable", "Monitor", "Keyboard",
];

const REGIONS: [&str; 20] = [
    "North", "South", "East", "West", "North",
    "South", "East", "West", "North", "South",
    "East", "West", "North", "South", "East",
    "West", "North", "South", "East", "West",
];

const REVENUES: [f64; 20] = [
    45000.0, 500.0, 1500.0, 12000.0, 48000.0,
    2500.0, 450.0, 1600.0, 11000.0, 47000.0,
    200.0, 2400.0, 11500.0, 1550.0, 480.0,
    46000.0, 2600.0, 210.0, 12500.0, 1580.0,
];

const QUANTITIES: [u32; 20] = [
    1, 2, 1, 1, 1,
    1, 3, 1, 1, 1,
    4, 1, 1, 1, 2,
    1, 1, 5, 1, 1,
];

/// The sample dataset, ordered by sale id (1..=20)
pub fn get_records() -> Vec<Sale> {
    (0..PRODUCTS.len())
        .map(|i| Sale::new(i as u32 + 1, PRODUCTS[i], REGIONS[i], REVENUES[i], QUANTITIES[i]))
        .collect()
}

/// Derive summary statistics from a record set
pub fn summarize(records: &[Sale]) -> Summary {
    let total_revenue: f64 = records.iter().map(|s| s.revenue).sum();
    let total_sales = records.len();
    let average_revenue = if total_sales == 0 {
        0.0
    } else {
        total_revenue / total_sales as f64
    };

    let products = group_by(records, |s| s.product.as_str());
    let (top_product, top_product_revenue) = match top_group(&products) {
        Some(top) => (top.name.clone(), top.total_revenue),
        None => (String::new(), 0.0),
    };

    let sales_by_region = group_by(records, |s| s.region.as_str())
        .into_iter()
        .map(|g| (g.name, g.total_revenue))
        .collect();

    Summary {
        total_revenue,
        total_sales,
        average_revenue,
        top_product,
        top_product_revenue,
        sales_by_region,
        products: distinct(records, |s| s.product.as_str()),
        regions: distinct(records, |s| s.region.as_str()),
    }
}

/// Write the record set as CSV with a header row
pub fn write_csv<W: Write>(records: &[Sale], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for sale in records {
        csv_writer.serialize(sale)?;
    }
    csv_writer.flush()?;
    Ok(())
}
