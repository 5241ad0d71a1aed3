//! Visualization collaborator seam.
//!
//! The dashboard hands a parsed table to a `ChartBuilder` and ships whatever
//! datasets come back; chart *rendering* happens client-side. A builder
//! failure is never fatal: the pipeline falls back to raw preview rows.

use std::collections::HashMap;

use crate::models::{ChartSeries, DataTable, SalesTotals};

/// How many products the per-product chart keeps.
const TOP_PRODUCTS: usize = 10;

/// Chart-builder failure. Recoverable: the dashboard downgrades to a
/// raw-row preview.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    #[error("no data rows to chart")]
    EmptyTable,
}

/// Everything the builder produces for one table.
#[derive(Debug, Clone)]
pub struct ChartReport {
    pub totals: SalesTotals,
    pub charts: Vec<ChartSeries>,
}

/// Seam for the external visualization collaborator.
pub trait ChartBuilder: Send + Sync {
    fn build(&self, table: &DataTable) -> Result<ChartReport, ChartError>;
}

/// Built-in builder for the advisory sales schema
/// (Order Date, Customer ID, Product, Category, Quantity, Unit Price).
#[derive(Debug, Default, Clone)]
pub struct SalesChartBuilder;

impl ChartBuilder for SalesChartBuilder {
    fn build(&self, table: &DataTable) -> Result<ChartReport, ChartError> {
        if table.rows.is_empty() {
            return Err(ChartError::EmptyTable);
        }

        let date_col = require(table, "Order Date")?;
        let customer_col = require(table, "Customer ID")?;
        let product_col = require(table, "Product")?;
        let category_col = require(table, "Category")?;
        let quantity_col = require(table, "Quantity")?;
        let price_col = require(table, "Unit Price")?;

        let mut revenue_by_category: Vec<(String, f64)> = Vec::new();
        let mut units_by_product: Vec<(String, f64)> = Vec::new();
        let mut revenue_by_date: HashMap<String, f64> = HashMap::new();
        let mut customers: Vec<String> = Vec::new();
        let mut total_revenue = 0.0;
        let mut total_units = 0.0;

        for row in &table.rows {
            // Rows with unparseable numbers are skipped, not fatal
            let quantity: f64 = match row[quantity_col].trim().parse() {
                Ok(q) => q,
                Err(_) => continue,
            };
            let unit_price: f64 = match row[price_col].trim().parse() {
                Ok(p) => p,
                Err(_) => continue,
            };
            let revenue = quantity * unit_price;

            total_units += quantity;
            total_revenue += revenue;

            accumulate(&mut revenue_by_category, row[category_col].trim(), revenue);
            accumulate(&mut units_by_product, row[product_col].trim(), quantity);
            *revenue_by_date
                .entry(row[date_col].trim().to_string())
                .or_insert(0.0) += revenue;

            let customer = row[customer_col].trim().to_string();
            if !customers.contains(&customer) {
                customers.push(customer);
            }
        }

        // Top products by units sold
        units_by_product.sort_by(|a, b| b.1.total_cmp(&a.1));
        units_by_product.truncate(TOP_PRODUCTS);

        // Dates in ascending order (ISO dates sort correctly as strings)
        let mut by_date: Vec<(String, f64)> = revenue_by_date.into_iter().collect();
        by_date.sort_by(|a, b| a.0.cmp(&b.0));

        let charts = vec![
            to_series("Revenue by category", revenue_by_category),
            to_series("Units sold by product", units_by_product),
            to_series("Revenue over time", by_date),
        ];

        Ok(ChartReport {
            totals: SalesTotals {
                revenue: total_revenue,
                units: total_units,
                customers: customers.len() as u64,
            },
            charts,
        })
    }
}

fn require(table: &DataTable, name: &str) -> Result<usize, ChartError> {
    table
        .column_index(name)
        .ok_or_else(|| ChartError::MissingColumn(name.to_string()))
}

/// Add `value` to the entry for `key`, preserving first-seen order.
fn accumulate(entries: &mut Vec<(String, f64)>, key: &str, value: f64) {
    match entries.iter_mut().find(|(k, _)| k == key) {
        Some((_, v)) => *v += value,
        None => entries.push((key.to_string(), value)),
    }
}

fn to_series(title: &str, entries: Vec<(String, f64)>) -> ChartSeries {
    let (labels, values) = entries.into_iter().unzip();
    ChartSeries {
        title: title.to_string(),
        labels,
        values,
    }
}
