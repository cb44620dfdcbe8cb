use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Note tag written by the purchase module when it pays a supplier in cash
pub const PURCHASE_MODULE_CASH_OUT_TAG: &str = "Cash Out from Purchase Module";

/// Note tag written when a sale's difference amount is settled in cash
pub const DIFFERENCE_CASH_TAG: &str = "Difference Cash";

/// Kind of business party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Customer,
    Supplier,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Customer => "Customer",
            EntityType::Supplier => "Supplier",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer or supplier the business trades with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity ID in format: "<customer|supplier>::epoch_millis"
    pub id: String,
    pub name: String,
    pub entity_type: EntityType,
    pub phone: String,
    pub address: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// A sale billed to a customer.
///
/// `difference_amount` is signed: positive means the business owes the
/// customer, negative means the customer owes the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub customer_id: String,
    pub date: NaiveDate,
    pub total_portal_amount: f64,
    pub portal_amount_paid: f64,
    pub difference_amount: f64,
    pub difference_amount_paid: f64,
}

impl Sale {
    /// Portal amount still unpaid on this sale
    pub fn pending_portal_amount(&self) -> f64 {
        self.total_portal_amount - self.portal_amount_paid
    }
}

/// A purchase bought from a customer/supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: String,
    pub customer_id: String,
    pub date: NaiveDate,
    pub grand_total: f64,
    pub amount_paid: f64,
}

impl Purchase {
    /// Amount the business still owes on this purchase
    pub fn pending_amount(&self) -> f64 {
        self.grand_total - self.amount_paid
    }
}

/// Direction of a cash movement, seen from the business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashDirection {
    /// Cash received from the customer
    #[serde(rename = "RECEIVE")]
    Receive,
    /// Cash given to the customer
    #[serde(rename = "GIVE")]
    Give,
}

impl CashDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CashDirection::Receive => "RECEIVE",
            CashDirection::Give => "GIVE",
        }
    }
}

impl fmt::Display for CashDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a cash transaction, derived from the tags other modules
/// write into its note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashCategory {
    /// Supplier payment recorded by the purchase module
    PurchaseModuleCashOut,
    /// Cash settlement of a sale's difference amount
    DifferenceCash,
    /// Any other cash movement
    General,
}

impl CashCategory {
    /// Classify a note by substring match on the known tags
    pub fn from_note(note: &str) -> Self {
        if note.contains(PURCHASE_MODULE_CASH_OUT_TAG) {
            CashCategory::PurchaseModuleCashOut
        } else if note.contains(DIFFERENCE_CASH_TAG) {
            CashCategory::DifferenceCash
        } else {
            CashCategory::General
        }
    }

    /// Whether transactions of this category take part in the net balance
    pub fn counts_toward_balance(&self) -> bool {
        matches!(self, CashCategory::General)
    }
}

/// A cash movement between the business and a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashTransaction {
    pub id: String,
    pub customer_id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub direction: CashDirection,
    pub note: String,
}

impl CashTransaction {
    pub fn category(&self) -> CashCategory {
        CashCategory::from_note(&self.note)
    }
}

/// Aggregate currency figures for one customer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub pending_portal_amount: f64,
    pub pending_difference_amount: f64,
    pub pending_purchase_amount: f64,
    pub net_balance: f64,
    pub cash_in_amount: f64,
    pub cash_out_amount: f64,
    pub positive_difference_amount: f64,
    pub negative_difference_amount: f64,
}

/// Column a ledger can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerSortField {
    CustomerName,
    PendingPortalAmount,
    PendingDifferenceAmount,
    PendingPurchaseAmount,
    #[default]
    NetBalance,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// One entity's line in the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub entity_id: String,
    pub entity_name: String,
    pub summary: FinancialSummary,
}

/// Column totals across the rows of a ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub pending_portal_amount: f64,
    pub pending_difference_amount: f64,
    pub pending_purchase_amount: f64,
    pub net_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRequest {
    /// Which kind of entity to list (customers by default)
    pub entity_type: EntityType,
    pub sort_field: LedgerSortField,
    pub sort_direction: SortDirection,
    /// Case-insensitive substring of the entity name
    pub search: Option<String>,
    /// Drop rows with nothing pending and a zero net balance
    pub hide_settled: bool,
}

impl Default for LedgerRequest {
    fn default() -> Self {
        Self {
            entity_type: EntityType::Customer,
            sort_field: LedgerSortField::default(),
            sort_direction: SortDirection::default(),
            search: None,
            hide_settled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerResponse {
    pub rows: Vec<LedgerRow>,
    pub totals: LedgerTotals,
}

/// Kind of bill that still has money outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillKind {
    Sale,
    Purchase,
}

/// A sale or purchase with an unpaid balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingBill {
    pub kind: BillKind,
    pub bill_id: String,
    pub customer_id: String,
    pub date: NaiveDate,
    pub total: f64,
    pub paid: f64,
    pub outstanding: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingBillsResponse {
    pub bills: Vec<PendingBill>,
    pub sale_count: usize,
    pub purchase_count: usize,
    pub total_receivable: f64,
    pub total_payable: f64,
}
