//! # CSV Storage Module
//!
//! File-based storage for the plant ledger. Every record kind lives in its own
//! CSV file at the root of the data directory; application settings live in a
//! YAML file next to them.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── app_config.yaml
//! ├── entities.csv
//! ├── sales.csv
//! ├── purchases.csv
//! └── cash_transactions.csv
//! ```
//!
//! Missing files are created with their header on first access. Writes replace
//! the whole file through a temp file and a rename.

pub mod app_config_repository;
pub mod cash_transaction_repository;
pub mod connection;
pub mod entity_repository;
pub mod purchase_repository;
pub mod sale_repository;

#[cfg(test)]
pub mod test_utils;

pub use app_config_repository::{AppConfig, AppConfigRepository};
pub use cash_transaction_repository::CashTransactionRepository;
pub use connection::CsvConnection;
pub use entity_repository::EntityRepository;
pub use purchase_repository::PurchaseRepository;
pub use sale_repository::SaleRepository;
