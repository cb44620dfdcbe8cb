/// Test utilities module for automatic cleanup and consistent test infrastructure
///
/// This module provides RAII-based cleanup that guarantees test data is removed
/// even if tests panic or fail.
use anyhow::Result;
use chrono::NaiveDate;
use shared::{CashDirection, CashTransaction, Entity, EntityType, Purchase, Sale};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use super::connection::CsvConnection;

/// RAII test environment; the temp directory is removed when it is dropped
pub struct TestEnvironment {
    /// Kept alive until drop
    _temp_dir: TempDir,
    pub connection: Arc<CsvConnection>,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("plant_ledger_test_")?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = Arc::new(CsvConnection::new(&base_path)?);

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
}

pub fn sample_entity(id: &str, name: &str, entity_type: EntityType) -> Entity {
    Entity {
        id: id.to_string(),
        name: name.to_string(),
        entity_type,
        phone: "555-0100".to_string(),
        address: "Main Road".to_string(),
        created_at: "2024-03-01T09:00:00+00:00".to_string(),
    }
}

pub fn sample_sale(
    id: &str,
    customer_id: &str,
    total_portal_amount: f64,
    portal_amount_paid: f64,
    difference_amount: f64,
    difference_amount_paid: f64,
) -> Sale {
    Sale {
        id: id.to_string(),
        customer_id: customer_id.to_string(),
        date: test_date(),
        total_portal_amount,
        portal_amount_paid,
        difference_amount,
        difference_amount_paid,
    }
}

pub fn sample_purchase(id: &str, customer_id: &str, grand_total: f64, amount_paid: f64) -> Purchase {
    Purchase {
        id: id.to_string(),
        customer_id: customer_id.to_string(),
        date: test_date(),
        grand_total,
        amount_paid,
    }
}

pub fn sample_cash(
    id: &str,
    customer_id: &str,
    amount: f64,
    direction: CashDirection,
    note: &str,
) -> CashTransaction {
    CashTransaction {
        id: id.to_string(),
        customer_id: customer_id.to_string(),
        date: test_date(),
        amount,
        direction,
        note: note.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleanup() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new()?;
            base_path = env.base_path.clone();
            assert!(base_path.exists());
        }
        assert!(!base_path.exists());
        Ok(())
    }
}
