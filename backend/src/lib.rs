//! # Plant Ledger Backend
//!
//! Non-UI logic for the plant-management ledger:
//! - **Domain**: financial summaries, the ledger, pending bills and the
//!   services that record entities, sales, purchases and cash movements
//! - **Storage**: CSV/YAML persistence in a single data directory
//!
//! ## Architecture
//!
//! ```text
//! CLI (plant-ledger binary)
//!     ↓
//! Domain Layer (services, pure calculations)
//!     ↓
//! Storage Layer (CSV files, YAML config)
//! ```

use anyhow::Result;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

pub mod domain;
pub mod error;
pub mod storage;

pub use storage::csv::{AppConfig, AppConfigRepository, CsvConnection};

/// Main backend struct that wires storage into all services
pub struct Backend {
    pub config: AppConfig,
    pub config_repository: AppConfigRepository,
    pub entity_service: domain::EntityService,
    pub transaction_service: domain::TransactionService,
    pub ledger_service: domain::LedgerService,
    pub pending_bill_service: domain::PendingBillService,
    pub export_service: domain::ExportService,
}

impl Backend {
    /// Open the backend on `data_dir`, or on the default data directory
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let connection = match data_dir {
            Some(dir) => CsvConnection::new(dir)?,
            None => CsvConnection::new_default()?,
        };
        info!("Using data directory {}", connection.base_directory().display());

        Self::with_connection(Arc::new(connection))
    }

    pub fn with_connection(csv_conn: Arc<CsvConnection>) -> Result<Self> {
        let config_repository = AppConfigRepository::new(csv_conn.clone());
        let config = config_repository.load_or_create()?;

        Ok(Backend {
            entity_service: domain::EntityService::new(csv_conn.clone()),
            transaction_service: domain::TransactionService::new(csv_conn.clone()),
            ledger_service: domain::LedgerService::new(csv_conn.clone()),
            pending_bill_service: domain::PendingBillService::new(csv_conn),
            export_service: domain::ExportService::new(config.decimal_places),
            config_repository,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::entity::CreateEntityCommand;
    use crate::domain::commands::transactions::{
        RecordCashTransactionCommand, RecordPurchaseCommand, RecordSaleCommand,
    };
    use crate::storage::csv::test_utils::{test_date, TestEnvironment};
    use shared::{CashDirection, EntityType, LedgerRequest, LedgerSortField, SortDirection};

    #[test]
    fn test_end_to_end_summary_and_ledger() -> Result<()> {
        let env = TestEnvironment::new()?;
        let backend = Backend::with_connection(env.connection.clone())?;

        let customer = backend.entity_service.create_entity(CreateEntityCommand {
            name: "Green Valley".to_string(),
            entity_type: EntityType::Customer,
            phone: String::new(),
            address: String::new(),
        })?;
        let other = backend.entity_service.create_entity(CreateEntityCommand {
            name: "Blue Hills".to_string(),
            entity_type: EntityType::Customer,
            phone: String::new(),
            address: String::new(),
        })?;

        backend.transaction_service.record_sale(RecordSaleCommand {
            customer_id: customer.id.clone(),
            date: test_date(),
            total_portal_amount: 1000.0,
            portal_amount_paid: 400.0,
            difference_amount: 100.0,
            difference_amount_paid: 20.0,
        })?;
        backend.transaction_service.record_purchase(RecordPurchaseCommand {
            customer_id: customer.id.clone(),
            date: test_date(),
            grand_total: 300.0,
            amount_paid: 300.0,
        })?;
        backend.transaction_service.record_cash_transaction(RecordCashTransactionCommand {
            customer_id: customer.id.clone(),
            date: test_date(),
            amount: 50.0,
            direction: CashDirection::Receive,
            note: "Cash In from Sale Module".to_string(),
        })?;
        backend.transaction_service.record_cash_transaction(RecordCashTransactionCommand {
            customer_id: other.id.clone(),
            date: test_date(),
            amount: 20.0,
            direction: CashDirection::Give,
            note: "advance".to_string(),
        })?;

        let summary = backend.ledger_service.customer_summary(&customer.id)?.summary;
        assert_eq!(summary.net_balance, 630.0);

        let ledger = backend.ledger_service.build_ledger(&LedgerRequest {
            sort_field: LedgerSortField::NetBalance,
            sort_direction: SortDirection::Ascending,
            ..LedgerRequest::default()
        })?;
        let names: Vec<&str> = ledger.rows.iter().map(|r| r.entity_name.as_str()).collect();
        assert_eq!(names, vec!["Blue Hills", "Green Valley"]);
        assert_eq!(ledger.totals.net_balance, 650.0);

        let pending = backend.pending_bill_service.list_pending_bills(Some(&customer.id))?;
        assert_eq!(pending.sale_count, 1);
        assert_eq!(pending.total_receivable, 600.0);
        Ok(())
    }

    #[test]
    fn test_backend_creates_config_on_open() -> Result<()> {
        let env = TestEnvironment::new()?;
        let backend = Backend::new(Some(env.base_path.clone()))?;
        assert_eq!(backend.config.decimal_places, 2);
        assert!(env.base_path.join("app_config.yaml").exists());
        Ok(())
    }
}
