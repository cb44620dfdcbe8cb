//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! All operations are synchronous; the data set of a single business fits
//! comfortably in memory and is re-read on every query.

use anyhow::Result;
use shared::{CashTransaction, Entity, Purchase, Sale};

/// Trait defining the interface for entity (customer/supplier) storage
pub trait EntityStorage: Send + Sync {
    /// Store a new entity
    fn store_entity(&self, entity: &Entity) -> Result<()>;

    /// Retrieve a specific entity by ID
    fn get_entity(&self, entity_id: &str) -> Result<Option<Entity>>;

    /// List all entities in storage order
    fn list_entities(&self) -> Result<Vec<Entity>>;
}

/// Trait defining the interface for sale storage
pub trait SaleStorage: Send + Sync {
    fn store_sale(&self, sale: &Sale) -> Result<()>;

    /// List every sale across all customers
    fn list_sales(&self) -> Result<Vec<Sale>>;

    /// List the sales belonging to one customer
    fn list_sales_for_customer(&self, customer_id: &str) -> Result<Vec<Sale>> {
        Ok(self
            .list_sales()?
            .into_iter()
            .filter(|sale| sale.customer_id == customer_id)
            .collect())
    }
}

/// Trait defining the interface for purchase storage
pub trait PurchaseStorage: Send + Sync {
    fn store_purchase(&self, purchase: &Purchase) -> Result<()>;

    fn list_purchases(&self) -> Result<Vec<Purchase>>;

    fn list_purchases_for_customer(&self, customer_id: &str) -> Result<Vec<Purchase>> {
        Ok(self
            .list_purchases()?
            .into_iter()
            .filter(|purchase| purchase.customer_id == customer_id)
            .collect())
    }
}

/// Trait defining the interface for cash transaction storage
pub trait CashTransactionStorage: Send + Sync {
    fn store_cash_transaction(&self, transaction: &CashTransaction) -> Result<()>;

    fn list_cash_transactions(&self) -> Result<Vec<CashTransaction>>;

    fn list_cash_transactions_for_customer(&self, customer_id: &str) -> Result<Vec<CashTransaction>> {
        Ok(self
            .list_cash_transactions()?
            .into_iter()
            .filter(|tx| tx.customer_id == customer_id)
            .collect())
    }
}
