//! Domain-level command and result types.
//!
//! Services take these as input and hand them back as output; the CLI maps
//! its arguments onto them.

pub mod entity {
    use shared::EntityType;

    /// Input for creating a new customer or supplier
    #[derive(Debug, Clone)]
    pub struct CreateEntityCommand {
        pub name: String,
        pub entity_type: EntityType,
        pub phone: String,
        pub address: String,
    }
}

pub mod transactions {
    use chrono::NaiveDate;
    use shared::CashDirection;

    #[derive(Debug, Clone)]
    pub struct RecordSaleCommand {
        pub customer_id: String,
        pub date: NaiveDate,
        pub total_portal_amount: f64,
        pub portal_amount_paid: f64,
        /// Signed: positive when the business owes the customer
        pub difference_amount: f64,
        pub difference_amount_paid: f64,
    }

    #[derive(Debug, Clone)]
    pub struct RecordPurchaseCommand {
        pub customer_id: String,
        pub date: NaiveDate,
        pub grand_total: f64,
        pub amount_paid: f64,
    }

    #[derive(Debug, Clone)]
    pub struct RecordCashTransactionCommand {
        pub customer_id: String,
        pub date: NaiveDate,
        pub amount: f64,
        pub direction: CashDirection,
        pub note: String,
    }
}

pub mod ledger {
    use shared::{Entity, FinancialSummary};

    /// One customer together with their computed summary
    #[derive(Debug, Clone)]
    pub struct CustomerSummaryResult {
        pub entity: Entity,
        pub summary: FinancialSummary,
    }
}

pub mod export {
    use std::path::PathBuf;

    #[derive(Debug, Clone)]
    pub struct ExportLedgerResult {
        pub path: PathBuf,
        pub row_count: usize,
    }
}
