use thiserror::Error;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::models::{
    catalog::{Catalog, CatalogItem},
    order::{AddLineRequest, LineItem, Order, OrderError},
};

pub const DEFAULT_SELECTION_LIMIT: usize = 50;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OrderServiceError {
    #[error("Invalid product selection {index}. Please choose between 1 and {max}.")]
    InvalidSelection { index: i64, max: usize },

    #[error("Quantity must be greater than 0.")]
    NonPositiveQuantity { quantity: i64 },

    #[error("Quantity {quantity} is too large. The maximum is {max}.")]
    QuantityTooLarge { quantity: i64, max: u32 },

    #[error("Product limit reached. You can select a maximum of {limit} products.")]
    SelectionLimitReached { limit: usize },

    #[error("{0}")]
    NotFound(#[from] OrderError),
}

/// Business rules around a single order: catalog selection, quantity
/// validation and the cap on how many products may be added.
pub struct OrderService<'a> {
    catalog: &'a Catalog,
    order: Order<'a>,
    selections: usize,
    selection_limit: usize,
}

impl<'a> OrderService<'a> {
    pub fn new(catalog: &'a Catalog, customer: impl Into<String>, selection_limit: usize) -> Self {
        let order = Order::new(customer, catalog);
        info!(
            "Opened order for customer '{}' (selection limit {})",
            order.customer(),
            selection_limit
        );

        Self {
            catalog,
            order,
            selections: 0,
            selection_limit,
        }
    }

    /// Resolves a 1-based catalog position typed by the operator.
    pub fn select_product(&self, index: i64) -> Result<&'a CatalogItem, OrderServiceError> {
        usize::try_from(index)
            .ok()
            .and_then(|position| self.catalog.get(position).ok())
            .ok_or_else(|| {
                warn!("Rejected catalog selection {}", index);
                OrderServiceError::InvalidSelection {
                    index,
                    max: self.catalog.len(),
                }
            })
    }

    /// Validates the quantity and appends a new line to the order.
    pub fn add_product(
        &mut self,
        item: &'a CatalogItem,
        quantity: i64,
    ) -> Result<&LineItem<'a>, OrderServiceError> {
        if self.limit_reached() {
            return Err(OrderServiceError::SelectionLimitReached {
                limit: self.selection_limit,
            });
        }

        AddLineRequest::new(quantity).validate().map_err(|e| {
            warn!("Rejected quantity {} for {}: {}", quantity, item.name, e);
            OrderServiceError::NonPositiveQuantity { quantity }
        })?;

        let quantity = u32::try_from(quantity).map_err(|_| OrderServiceError::QuantityTooLarge {
            quantity,
            max: u32::MAX,
        })?;

        self.selections += 1;
        debug!(
            "Adding {} x {} (selection {}/{})",
            quantity, item.name, self.selections, self.selection_limit
        );

        Ok(self.order.add(item, quantity))
    }

    /// Removes the first line matching `name`, case-insensitively.
    pub fn remove_product(&mut self, name: &str) -> Result<LineItem<'a>, OrderServiceError> {
        let line = self.order.remove(name).map_err(|e| {
            warn!("Remove failed: {}", e);
            OrderServiceError::NotFound(e)
        })?;

        debug!("Removed {} x {}", line.quantity, line.name());
        Ok(line)
    }

    pub fn selections(&self) -> usize {
        self.selections
    }

    pub fn selection_limit(&self) -> usize {
        self.selection_limit
    }

    pub fn limit_reached(&self) -> bool {
        self.selections >= self.selection_limit
    }

    pub fn order(&self) -> &Order<'a> {
        &self.order
    }

    pub fn into_order(self) -> Order<'a> {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_product_in_range() {
        let catalog = Catalog::stationery();
        let service = OrderService::new(&catalog, "Asha", DEFAULT_SELECTION_LIMIT);

        let item = service.select_product(2).unwrap();
        assert_eq!(item.name, "Notebook");
    }

    #[test]
    fn test_select_product_out_of_range() {
        let catalog = Catalog::stationery();
        let service = OrderService::new(&catalog, "Asha", DEFAULT_SELECTION_LIMIT);

        for index in [i64::MIN, -1, 11, 99] {
            assert_eq!(
                service.select_product(index),
                Err(OrderServiceError::InvalidSelection { index, max: 10 })
            );
        }
    }

    #[test]
    fn test_add_product_counts_selections() {
        let catalog = Catalog::stationery();
        let mut service = OrderService::new(&catalog, "Asha", DEFAULT_SELECTION_LIMIT);

        let notebook = service.select_product(2).unwrap();
        let line = service.add_product(notebook, 3).unwrap();
        assert_eq!(line.subtotal(), 150);

        assert_eq!(service.selections(), 1);
        assert_eq!(service.order().total(), 150);
    }

    #[test]
    fn test_add_product_rejects_non_positive_quantity() {
        let catalog = Catalog::stationery();
        let mut service = OrderService::new(&catalog, "Asha", DEFAULT_SELECTION_LIMIT);
        let pen = service.select_product(1).unwrap();

        assert_eq!(
            service.add_product(pen, 0).unwrap_err(),
            OrderServiceError::NonPositiveQuantity { quantity: 0 }
        );
        assert_eq!(
            service.add_product(pen, -5).unwrap_err(),
            OrderServiceError::NonPositiveQuantity { quantity: -5 }
        );

        assert_eq!(service.selections(), 0);
        assert!(service.order().is_empty());
    }

    #[test]
    fn test_add_product_rejects_oversized_quantity() {
        let catalog = Catalog::stationery();
        let mut service = OrderService::new(&catalog, "Asha", DEFAULT_SELECTION_LIMIT);
        let pen = service.select_product(1).unwrap();

        let quantity = i64::from(u32::MAX) + 1;
        assert!(matches!(
            service.add_product(pen, quantity),
            Err(OrderServiceError::QuantityTooLarge { .. })
        ));
        assert_eq!(service.selections(), 0);
    }

    #[test]
    fn test_limit_blocks_further_adds() {
        let catalog = Catalog::stationery();
        let mut service = OrderService::new(&catalog, "Asha", 2);
        let eraser = service.select_product(3).unwrap();

        service.add_product(eraser, 1).unwrap();
        assert!(!service.limit_reached());
        service.add_product(eraser, 1).unwrap();
        assert!(service.limit_reached());

        assert_eq!(
            service.add_product(eraser, 1).unwrap_err(),
            OrderServiceError::SelectionLimitReached { limit: 2 }
        );
        assert_eq!(service.order().lines().len(), 2);
    }

    #[test]
    fn test_remove_does_not_refund_selection() {
        let catalog = Catalog::stationery();
        let mut service = OrderService::new(&catalog, "Asha", DEFAULT_SELECTION_LIMIT);
        let folder = service.select_product(5).unwrap();

        service.add_product(folder, 2).unwrap();
        let removed = service.remove_product("folder").unwrap();
        assert_eq!(removed.quantity, 2);

        assert_eq!(service.selections(), 1);
        assert_eq!(service.order().total(), 0);
    }

    #[test]
    fn test_remove_unknown_maps_not_found() {
        let catalog = Catalog::stationery();
        let mut service = OrderService::new(&catalog, "Asha", DEFAULT_SELECTION_LIMIT);

        let err = service.remove_product("Crayon").unwrap_err();
        assert_eq!(err.to_string(), "Product \"Crayon\" not found in your order.");
    }
}
