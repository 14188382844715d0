use serde::Serialize;
use validator::Validate;

use crate::models::catalog::{Catalog, CatalogItem};
use crate::utils::formatting::format_currency;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem<'a> {
    pub item: &'a CatalogItem,
    pub quantity: u32,
}

impl<'a> LineItem<'a> {
    pub fn subtotal(&self) -> u64 {
        self.item.unit_price * u64::from(self.quantity)
    }

    pub fn name(&self) -> &'a str {
        &self.item.name
    }
}

// request dto
#[derive(Debug, Validate)]
pub struct AddLineRequest {
    #[validate(range(min = 1, message = "Quantity must be greater than 0"))]
    pub quantity: i64,
}

impl AddLineRequest {
    pub fn new(quantity: i64) -> Self {
        Self { quantity }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Product \"{name}\" not found in your order.")]
    NotFound { name: String },
}

/// One customer's order. `running_total` is kept in step with `lines` on
/// every add and remove rather than summed on demand.
#[derive(Debug)]
pub struct Order<'a> {
    customer: String,
    catalog: &'a Catalog,
    lines: Vec<LineItem<'a>>,
    running_total: u64,
}

impl<'a> Order<'a> {
    pub fn new(customer: impl Into<String>, catalog: &'a Catalog) -> Self {
        Self {
            customer: customer.into(),
            catalog,
            lines: Vec::new(),
            running_total: 0,
        }
    }

    /// Appends a new line; repeated products are never merged.
    /// Callers validate `quantity > 0` first.
    pub fn add(&mut self, item: &'a CatalogItem, quantity: u32) -> &LineItem<'a> {
        debug_assert!(quantity > 0, "line quantity must be positive");

        let line = LineItem { item, quantity };
        self.running_total += line.subtotal();
        self.lines.push(line);

        debug_assert_eq!(self.running_total, self.recompute_total());
        &self.lines[self.lines.len() - 1]
    }

    /// Removes the first line whose product name matches `name`,
    /// ignoring case. Later lines for the same product stay.
    pub fn remove(&mut self, name: &str) -> Result<LineItem<'a>, OrderError> {
        let position = self
            .lines
            .iter()
            .position(|line| line.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| OrderError::NotFound {
                name: name.to_string(),
            })?;

        let line = self.lines.remove(position);
        self.running_total -= line.subtotal();

        debug_assert_eq!(self.running_total, self.recompute_total());
        Ok(line)
    }

    pub fn render(&self) -> String {
        let currency = self.catalog.currency();
        let mut output = format!("Order for {}:\n", self.customer);

        for line in &self.lines {
            output.push_str(&format!(
                "{} (x{}): {}\n",
                line.name(),
                line.quantity,
                format_currency(currency, line.subtotal())
            ));
        }

        output.push_str(&format!(
            "Total Amount: {}\n",
            format_currency(currency, self.running_total)
        ));
        output
    }

    pub fn total(&self) -> u64 {
        self.running_total
    }

    /// Sums every line from scratch, independent of the running total.
    pub fn recompute_total(&self) -> u64 {
        self.lines.iter().map(LineItem::subtotal).sum()
    }

    pub fn lines(&self) -> &[LineItem<'a>] {
        &self.lines
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn currency(&self) -> &str {
        self.catalog.currency()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn receipt(&self) -> Receipt {
        Receipt {
            customer: self.customer.clone(),
            currency: self.catalog.currency().to_string(),
            lines: self
                .lines
                .iter()
                .map(|line| ReceiptLine {
                    name: line.name().to_string(),
                    unit_price: line.item.unit_price,
                    quantity: line.quantity,
                    subtotal: line.subtotal(),
                })
                .collect(),
            total: self.running_total,
        }
    }
}

// Owned snapshot of an order for serialization
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Receipt {
    pub customer: String,
    pub currency: String,
    pub lines: Vec<ReceiptLine>,
    pub total: u64,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ReceiptLine {
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub subtotal: u64,
}
