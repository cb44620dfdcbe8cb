use anyhow::Result;
use log::info;
use shared::Sale;
use std::sync::Arc;

use super::connection::CsvConnection;
use crate::error::StorageError;
use crate::storage::traits::SaleStorage;

pub const SALES_FILE: &str = "sales.csv";
const SALES_HEADER: &[&str] = &[
    "id",
    "customer_id",
    "date",
    "total_portal_amount",
    "portal_amount_paid",
    "difference_amount",
    "difference_amount_paid",
];

/// CSV-based sale repository backed by `sales.csv`
#[derive(Clone)]
pub struct SaleRepository {
    connection: Arc<CsvConnection>,
}

impl SaleRepository {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }
}

impl SaleStorage for SaleRepository {
    fn store_sale(&self, sale: &Sale) -> Result<()> {
        let mut sales = self.list_sales()?;

        if sales.iter().any(|s| s.id == sale.id) {
            return Err(StorageError::DuplicateId {
                kind: "sale",
                id: sale.id.clone(),
            }
            .into());
        }

        sales.push(sale.clone());
        self.connection.write_records(SALES_FILE, SALES_HEADER, &sales)?;

        info!("Stored sale {} for customer {}", sale.id, sale.customer_id);
        Ok(())
    }

    fn list_sales(&self) -> Result<Vec<Sale>> {
        self.connection.read_records(SALES_FILE, SALES_HEADER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::{sample_sale, TestEnvironment};

    #[test]
    fn test_list_sales_for_customer_filters_exactly() -> Result<()> {
        let env = TestEnvironment::new()?;
        let repo = SaleRepository::new(env.connection.clone());

        repo.store_sale(&sample_sale("s1", "customer::1", 1000.0, 400.0, 100.0, 20.0))?;
        repo.store_sale(&sample_sale("s2", "customer::10", 500.0, 0.0, 0.0, 0.0))?;
        repo.store_sale(&sample_sale("s3", "customer::1", 200.0, 200.0, -50.0, 10.0))?;

        let sales = repo.list_sales_for_customer("customer::1")?;
        let ids: Vec<&str> = sales.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s3"]);
        assert_eq!(repo.list_sales()?.len(), 3);
        Ok(())
    }

    #[test]
    fn test_signed_difference_amount_round_trips() -> Result<()> {
        let env = TestEnvironment::new()?;
        let repo = SaleRepository::new(env.connection.clone());

        let sale = sample_sale("s1", "customer::1", 750.25, 0.0, -120.5, 20.25);
        repo.store_sale(&sale)?;

        assert_eq!(repo.list_sales()?, vec![sale]);
        Ok(())
    }
}
