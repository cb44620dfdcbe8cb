use anyhow::Result;
use log::info;
use shared::Purchase;
use std::sync::Arc;

use super::connection::CsvConnection;
use crate::error::StorageError;
use crate::storage::traits::PurchaseStorage;

pub const PURCHASES_FILE: &str = "purchases.csv";
const PURCHASES_HEADER: &[&str] = &["id", "customer_id", "date", "grand_total", "amount_paid"];

/// CSV-based purchase repository backed by `purchases.csv`
#[derive(Clone)]
pub struct PurchaseRepository {
    connection: Arc<CsvConnection>,
}

impl PurchaseRepository {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }
}

impl PurchaseStorage for PurchaseRepository {
    fn store_purchase(&self, purchase: &Purchase) -> Result<()> {
        let mut purchases = self.list_purchases()?;

        if purchases.iter().any(|p| p.id == purchase.id) {
            return Err(StorageError::DuplicateId {
                kind: "purchase",
                id: purchase.id.clone(),
            }
            .into());
        }

        purchases.push(purchase.clone());
        self.connection
            .write_records(PURCHASES_FILE, PURCHASES_HEADER, &purchases)?;

        info!("Stored purchase {} for customer {}", purchase.id, purchase.customer_id);
        Ok(())
    }

    fn list_purchases(&self) -> Result<Vec<Purchase>> {
        self.connection.read_records(PURCHASES_FILE, PURCHASES_HEADER)
    }
}
