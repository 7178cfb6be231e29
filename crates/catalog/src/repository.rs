use brasa_core::{DomainResult, ProductId};

use crate::Product;

/// Catalog persistence contract.
///
/// Listings come back newest first, matching the storefront and back-office
/// ordering.
pub trait ProductRepository: Send + Sync {
    fn insert(&self, product: Product) -> DomainResult<()>;

    /// Replace an existing record; `NotFound` if it does not exist.
    fn update(&self, product: Product) -> DomainResult<()>;

    fn delete(&self, id: &ProductId) -> DomainResult<()>;

    fn get(&self, id: &ProductId) -> Option<Product>;

    fn list_newest_first(&self) -> Vec<Product>;

    fn count(&self) -> usize;
}
