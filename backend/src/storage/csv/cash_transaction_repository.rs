use anyhow::Result;
use log::info;
use shared::CashTransaction;
use std::sync::Arc;

use super::connection::CsvConnection;
use crate::error::StorageError;
use crate::storage::traits::CashTransactionStorage;

pub const CASH_TRANSACTIONS_FILE: &str = "cash_transactions.csv";
const CASH_TRANSACTIONS_HEADER: &[&str] = &["id", "customer_id", "date", "amount", "direction", "note"];

/// CSV-based cash transaction repository backed by `cash_transactions.csv`
#[derive(Clone)]
pub struct CashTransactionRepository {
    connection: Arc<CsvConnection>,
}

impl CashTransactionRepository {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }
}

impl CashTransactionStorage for CashTransactionRepository {
    fn store_cash_transaction(&self, transaction: &CashTransaction) -> Result<()> {
        let mut transactions = self.list_cash_transactions()?;

        if transactions.iter().any(|t| t.id == transaction.id) {
            return Err(StorageError::DuplicateId {
                kind: "cash transaction",
                id: transaction.id.clone(),
            }
            .into());
        }

        transactions.push(transaction.clone());
        self.connection.write_records(
            CASH_TRANSACTIONS_FILE,
            CASH_TRANSACTIONS_HEADER,
            &transactions,
        )?;

        info!(
            "Stored cash transaction {} ({} {:.2}) for customer {}",
            transaction.id, transaction.direction, transaction.amount, transaction.customer_id
        );
        Ok(())
    }

    fn list_cash_transactions(&self) -> Result<Vec<CashTransaction>> {
        self.connection
            .read_records(CASH_TRANSACTIONS_FILE, CASH_TRANSACTIONS_HEADER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::{sample_cash, TestEnvironment};
    use shared::{CashCategory, CashDirection};
    use std::fs;

    #[test]
    fn test_direction_and_note_round_trip() -> Result<()> {
        let env = TestEnvironment::new()?;
        let repo = CashTransactionRepository::new(env.connection.clone());

        let tx = sample_cash("c1", "customer::1", 50.0, CashDirection::Give, "Difference Cash, sale s1");
        repo.store_cash_transaction(&tx)?;

        let loaded = repo.list_cash_transactions()?;
        assert_eq!(loaded, vec![tx]);
        assert_eq!(loaded[0].category(), CashCategory::DifferenceCash);

        let raw = fs::read_to_string(env.connection.file_path(CASH_TRANSACTIONS_FILE))?;
        assert!(raw.contains(",GIVE,"));
        Ok(())
    }

    #[test]
    fn test_unknown_direction_fails_load() -> Result<()> {
        let env = TestEnvironment::new()?;
        fs::write(
            env.connection.file_path(CASH_TRANSACTIONS_FILE),
            "id,customer_id,date,amount,direction,note\nc1,customer::1,2024-03-01,10.0,SIDEWAYS,\n",
        )?;

        let repo = CashTransactionRepository::new(env.connection.clone());
        let err = repo.list_cash_transactions().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::InvalidRecord { line: 2, .. })
        ));
        Ok(())
    }
}
