//! # Storage Module
//!
//! Handles all data persistence for the plant ledger.
//!
//! The domain layer only sees the traits in [`traits`]; the CSV implementation
//! in [`csv`] keeps everything in a single data directory on disk.

pub mod csv;
pub mod traits;

pub use self::csv::{
    AppConfig, AppConfigRepository, CashTransactionRepository, CsvConnection, EntityRepository,
    PurchaseRepository, SaleRepository,
};
pub use traits::{CashTransactionStorage, EntityStorage, PurchaseStorage, SaleStorage};
