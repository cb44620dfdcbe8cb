//! Ledger-wide aggregation.
//!
//! The ledger applies the per-customer financial summary to every entity of a
//! type, then filters, sorts and totals the resulting rows.
//!
//! ## Ordering
//!
//! Sorting is stable. Descending uses the reversed comparator, so entities
//! with equal keys keep their input order in both directions. Amounts compare
//! with `f64::total_cmp`; names compare case-insensitively.

use anyhow::Result;
use log::{debug, info};
use shared::{
    CashTransaction, Entity, EntityType, LedgerRequest, LedgerResponse, LedgerRow, LedgerSortField,
    LedgerTotals, Purchase, Sale, SortDirection,
};
use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::commands::ledger::CustomerSummaryResult;
use crate::domain::financial_summary::calculate_financial_summary;
use crate::error::DomainError;
use crate::storage::csv::{
    CashTransactionRepository, CsvConnection, EntityRepository, PurchaseRepository, SaleRepository,
};
use crate::storage::traits::{CashTransactionStorage, EntityStorage, PurchaseStorage, SaleStorage};

/// Amounts closer to zero than this count as settled
pub const SETTLED_EPSILON: f64 = 0.005;

#[derive(Clone)]
pub struct LedgerService {
    entity_repository: EntityRepository,
    sale_repository: SaleRepository,
    purchase_repository: PurchaseRepository,
    cash_repository: CashTransactionRepository,
}

impl LedgerService {
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        Self {
            entity_repository: EntityRepository::new(csv_conn.clone()),
            sale_repository: SaleRepository::new(csv_conn.clone()),
            purchase_repository: PurchaseRepository::new(csv_conn.clone()),
            cash_repository: CashTransactionRepository::new(csv_conn),
        }
    }

    /// Compute the financial summary of a single customer
    pub fn customer_summary(&self, customer_id: &str) -> Result<CustomerSummaryResult> {
        let entity = self
            .entity_repository
            .get_entity(customer_id)?
            .ok_or_else(|| DomainError::EntityNotFound(customer_id.to_string()))?;

        let sales = self.sale_repository.list_sales_for_customer(customer_id)?;
        let purchases = self.purchase_repository.list_purchases_for_customer(customer_id)?;
        let cash = self.cash_repository.list_cash_transactions_for_customer(customer_id)?;

        let summary = calculate_financial_summary(customer_id, &sales, &purchases, &cash);
        info!(
            "Summary for {} ({}): net balance {:.2}",
            entity.name, customer_id, summary.net_balance
        );

        Ok(CustomerSummaryResult { entity, summary })
    }

    /// Build the ledger described by the request
    pub fn build_ledger(&self, request: &LedgerRequest) -> Result<LedgerResponse> {
        info!(
            "Building {} ledger sorted by {:?} {:?}",
            request.entity_type, request.sort_field, request.sort_direction
        );

        let entities = self.entity_repository.list_entities()?;
        let sales = self.sale_repository.list_sales()?;
        let purchases = self.purchase_repository.list_purchases()?;
        let cash = self.cash_repository.list_cash_transactions()?;

        let rows = build_ledger_rows(&entities, request.entity_type, &sales, &purchases, &cash);
        let mut rows = filter_ledger_rows(rows, request.search.as_deref(), request.hide_settled);
        sort_ledger_rows(&mut rows, request.sort_field, request.sort_direction);
        let totals = ledger_totals(&rows);

        debug!("Ledger has {} rows", rows.len());
        Ok(LedgerResponse { rows, totals })
    }
}

/// One row per entity of the given type, in entity order
pub fn build_ledger_rows(
    entities: &[Entity],
    entity_type: EntityType,
    sales: &[Sale],
    purchases: &[Purchase],
    cash_transactions: &[CashTransaction],
) -> Vec<LedgerRow> {
    entities
        .iter()
        .filter(|e| e.entity_type == entity_type)
        .map(|e| LedgerRow {
            entity_id: e.id.clone(),
            entity_name: e.name.clone(),
            summary: calculate_financial_summary(&e.id, sales, purchases, cash_transactions),
        })
        .collect()
}

/// Keep rows whose name contains `search` (case-insensitive), optionally
/// dropping settled rows
pub fn filter_ledger_rows(rows: Vec<LedgerRow>, search: Option<&str>, hide_settled: bool) -> Vec<LedgerRow> {
    let needle = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    rows.into_iter()
        .filter(|row| match &needle {
            Some(needle) => row.entity_name.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .filter(|row| !hide_settled || !is_settled(row))
        .collect()
}

fn is_settled(row: &LedgerRow) -> bool {
    let s = &row.summary;
    [
        s.pending_portal_amount,
        s.pending_difference_amount,
        s.pending_purchase_amount,
        s.net_balance,
    ]
    .iter()
    .all(|amount| amount.abs() < SETTLED_EPSILON)
}

/// Stable sort of ledger rows by a field and direction
pub fn sort_ledger_rows(rows: &mut [LedgerRow], field: LedgerSortField, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = compare_rows(a, b, field);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare_rows(a: &LedgerRow, b: &LedgerRow, field: LedgerSortField) -> Ordering {
    match field {
        LedgerSortField::CustomerName => a
            .entity_name
            .to_lowercase()
            .cmp(&b.entity_name.to_lowercase()),
        LedgerSortField::PendingPortalAmount => a
            .summary
            .pending_portal_amount
            .total_cmp(&b.summary.pending_portal_amount),
        LedgerSortField::PendingDifferenceAmount => a
            .summary
            .pending_difference_amount
            .total_cmp(&b.summary.pending_difference_amount),
        LedgerSortField::PendingPurchaseAmount => a
            .summary
            .pending_purchase_amount
            .total_cmp(&b.summary.pending_purchase_amount),
        LedgerSortField::NetBalance => a.summary.net_balance.total_cmp(&b.summary.net_balance),
    }
}

/// Column totals over the given rows
pub fn ledger_totals(rows: &[LedgerRow]) -> LedgerTotals {
    rows.iter().fold(LedgerTotals::default(), |mut totals, row| {
        totals.pending_portal_amount += row.summary.pending_portal_amount;
        totals.pending_difference_amount += row.summary.pending_difference_amount;
        totals.pending_purchase_amount += row.summary.pending_purchase_amount;
        totals.net_balance += row.summary.net_balance;
        totals
    })
}
