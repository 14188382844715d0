use serde::Serialize;

pub const DEFAULT_CURRENCY: &str = "Rupees";

// Fixed stationery price list, in whole currency units.
const STATIONERY: [(&str, u64); 10] = [
    ("Pen", 10),
    ("Notebook", 50),
    ("Eraser", 5),
    ("Marker", 15),
    ("Folder", 20),
    ("Pencil", 5),
    ("Highlighter", 20),
    ("Stapler", 55),
    ("Glue", 25),
    ("Scissors", 60),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    pub name: String,
    pub unit_price: u64,
}

impl CatalogItem {
    pub fn new(name: impl Into<String>, unit_price: u64) -> Self {
        Self {
            name: name.into(),
            unit_price,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("No product at position {index} (catalog has {len} products)")]
    NotFound { index: usize, len: usize },
}

/// Immutable product list shared by reference for the whole run.
#[derive(Debug, Clone)]
pub struct Catalog {
    currency: String,
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(currency: impl Into<String>, items: Vec<CatalogItem>) -> Self {
        Self {
            currency: currency.into(),
            items,
        }
    }

    /// The shop's fixed stationery list, priced in the default currency.
    pub fn stationery() -> Self {
        Self::with_currency(DEFAULT_CURRENCY)
    }

    pub fn with_currency(currency: impl Into<String>) -> Self {
        let items = STATIONERY
            .iter()
            .map(|(name, price)| CatalogItem::new(*name, *price))
            .collect();
        Self::new(currency, items)
    }

    pub fn list(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Looks up an item by its 1-based display position.
    pub fn get(&self, index: usize) -> Result<&CatalogItem, CatalogError> {
        index
            .checked_sub(1)
            .and_then(|i| self.items.get(i))
            .ok_or(CatalogError::NotFound {
                index,
                len: self.items.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}
