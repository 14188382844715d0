use clap::ValueEnum;
use std::fmt;
use tabled::{Table, Tabled, settings::{Style, Alignment}};

use crate::models::{catalog::Catalog, order::Order};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReceiptFormat {
    /// One line per product, as printed on a till slip
    #[default]
    Plain,
    /// Bordered table with unit prices
    Table,
    /// Machine-readable JSON
    Json,
}

impl fmt::Display for ReceiptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptFormat::Plain => write!(f, "plain"),
            ReceiptFormat::Table => write!(f, "table"),
            ReceiptFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Tabled)]
struct ReceiptTableRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Unit Price")]
    unit_price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Subtotal")]
    subtotal: String,
}

/// `1234567` -> `"1,234,567"`
pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

pub fn format_currency(label: &str, amount: u64) -> String {
    format!("{} {}", label, group_thousands(amount))
}

pub fn format_catalog(catalog: &Catalog) -> String {
    let mut output = String::from("Available products:\n");

    for (i, item) in catalog.list().iter().enumerate() {
        output.push_str(&format!(
            "{}. {}: {}\n",
            i + 1,
            item.name,
            format_currency(catalog.currency(), item.unit_price)
        ));
    }

    output
}

pub fn format_receipt(order: &Order<'_>, format: ReceiptFormat) -> serde_json::Result<String> {
    match format {
        ReceiptFormat::Plain => Ok(order.render()),
        ReceiptFormat::Table => Ok(format_receipt_table(order)),
        ReceiptFormat::Json => format_receipt_json(order),
    }
}

pub fn format_receipt_table(order: &Order<'_>) -> String {
    let currency = order.currency();
    let mut output = format!("Order for {}:\n", order.customer());

    if order.is_empty() {
        output.push_str("No products ordered.\n");
    } else {
        let rows: Vec<ReceiptTableRow> = order
            .lines()
            .iter()
            .enumerate()
            .map(|(i, line)| ReceiptTableRow {
                position: i + 1,
                name: line.name().to_string(),
                unit_price: format_currency(currency, line.item.unit_price),
                quantity: line.quantity,
                subtotal: format_currency(currency, line.subtotal()),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Alignment::left());

        output.push_str(&table.to_string());
        output.push('\n');
    }

    output.push_str(&format!(
        "Total Amount: {}\n",
        format_currency(currency, order.total())
    ));
    output
}

pub fn format_receipt_json(order: &Order<'_>) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(&order.receipt())?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12345), "12,345");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency("Rupees", 150), "Rupees 150");
        assert_eq!(format_currency("Rupees", 2750), "Rupees 2,750");
    }

    #[test]
    fn test_format_catalog_listing() {
        let listing = format_catalog(&Catalog::stationery());
        let lines: Vec<&str> = listing.lines().collect();

        assert_eq!(lines[0], "Available products:");
        assert_eq!(lines[1], "1. Pen: Rupees 10");
        assert_eq!(lines[2], "2. Notebook: Rupees 50");
        assert_eq!(lines[10], "10. Scissors: Rupees 60");
    }

    #[test]
    fn test_large_order_uses_grouping() {
        let catalog = Catalog::stationery();
        let mut order = Order::new("Meera", &catalog);
        order.add(catalog.get(10).unwrap(), 50);

        let receipt = format_receipt(&order, ReceiptFormat::Plain).unwrap();
        assert!(receipt.contains("Scissors (x50): Rupees 3,000"));
        assert!(receipt.ends_with("Total Amount: Rupees 3,000\n"));
    }

    #[test]
    fn test_table_receipt() {
        let catalog = Catalog::stationery();
        let mut order = Order::new("Meera", &catalog);
        order.add(catalog.get(7).unwrap(), 3);

        let receipt = format_receipt(&order, ReceiptFormat::Table).unwrap();
        assert!(receipt.starts_with("Order for Meera:\n"));
        assert!(receipt.contains("Highlighter"));
        assert!(receipt.contains("Rupees 60"));
        assert!(receipt.ends_with("Total Amount: Rupees 60\n"));
    }

    #[test]
    fn test_table_receipt_empty_order() {
        let catalog = Catalog::stationery();
        let order = Order::new("Meera", &catalog);

        let receipt = format_receipt_table(&order);
        assert!(receipt.contains("No products ordered."));
    }

    #[test]
    fn test_json_receipt() {
        let catalog = Catalog::stationery();
        let mut order = Order::new("Meera", &catalog);
        order.add(catalog.get(2).unwrap(), 3);

        let json = format_receipt(&order, ReceiptFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["customer"], "Meera");
        assert_eq!(value["total"], 150);
        assert_eq!(value["lines"][0]["name"], "Notebook");
        assert_eq!(value["lines"][0]["quantity"], 3);
    }
}
