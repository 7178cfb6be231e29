use brasa_catalog::{Product, ProductRepository};
use brasa_core::{DomainError, DomainResult, ProductId};

use crate::change_feed::{ChangeFeed, ChangeOp};
use crate::memory::Table;

pub struct InMemoryProductRepository {
    table: Table<ProductId, Product>,
    feed: ChangeFeed,
}

impl InMemoryProductRepository {
    pub fn new(feed: ChangeFeed) -> Self {
        Self {
            table: Table::new(),
            feed,
        }
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn insert(&self, product: Product) -> DomainResult<()> {
        let id = product.id;
        self.table.upsert(id, product);
        self.feed.publish("productos", ChangeOp::Created, id);
        Ok(())
    }

    fn update(&self, product: Product) -> DomainResult<()> {
        if !self.table.contains(&product.id) {
            return Err(DomainError::NotFound);
        }
        let id = product.id;
        self.table.upsert(id, product);
        self.feed.publish("productos", ChangeOp::Updated, id);
        Ok(())
    }

    fn delete(&self, id: &ProductId) -> DomainResult<()> {
        self.table.remove(id).ok_or(DomainError::NotFound)?;
        self.feed.publish("productos", ChangeOp::Deleted, id);
        Ok(())
    }

    fn get(&self, id: &ProductId) -> Option<Product> {
        self.table.get(id)
    }

    fn list_newest_first(&self) -> Vec<Product> {
        let mut products = self.table.values();
        products.sort_by(|a, b| b.fecha_creacion.cmp(&a.fecha_creacion));
        products
    }

    fn count(&self) -> usize {
        self.table.len()
    }
}
