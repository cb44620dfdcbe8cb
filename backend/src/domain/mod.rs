//! # Domain Module
//!
//! Business logic for the plant ledger. It operates independently of any UI
//! and only talks to storage through the traits in `storage::traits`.
//!
//! ## Module Organization
//!
//! - **financial_summary**: pure per-customer reduction of sales, purchases and
//!   cash transactions into pending amounts and a net balance
//! - **ledger_service**: the same summary across all entities, with sorting,
//!   filtering and totals
//! - **pending_bill_service**: sales and purchases with money still outstanding
//! - **entity_service**: customers and suppliers
//! - **transaction_service**: recording sales, purchases and cash movements
//! - **export_service**: CSV ledger report
//!
//! ## Sign Convention
//!
//! A positive net balance means the customer owes the business; a negative one
//! means the business owes the customer.

pub mod commands;
pub mod entity_service;
pub mod export_service;
pub mod financial_summary;
pub mod id;
pub mod ledger_service;
pub mod pending_bill_service;
pub mod transaction_service;

pub use entity_service::EntityService;
pub use export_service::ExportService;
pub use financial_summary::{calculate_financial_summary, cash_transaction_impact};
pub use ledger_service::LedgerService;
pub use pending_bill_service::PendingBillService;
pub use transaction_service::TransactionService;
