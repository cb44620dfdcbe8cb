//! Per-customer financial summary.
//!
//! Reduces a customer's sales, purchases and cash transactions into the
//! figures shown on the customer screen and in every ledger row. The
//! computation is pure: it reads the collections it is given and never fails.
//!
//! ## Formulas
//!
//! - pending portal = Σ (total portal amount − portal amount paid)
//! - positive difference = Σ over sales with difference > 0 of (difference − paid)
//! - negative difference = Σ over sales with difference < 0 of (difference + paid)
//! - pending purchase = Σ (grand total − amount paid)
//! - cash impact = Σ −amount for RECEIVE, +amount for GIVE
//! - net balance = pending portal + pending difference − pending purchase + cash impact
//!
//! Cash transactions tagged as purchase-module cash outs or difference cash are
//! left out of the cash figures; they are already settled through the bill they
//! belong to.

use shared::{CashDirection, CashTransaction, FinancialSummary, Purchase, Sale};

/// Compute the financial summary of one customer.
///
/// Records are matched on `customer_id` exactly; everything belonging to other
/// customers is ignored. No rounding is applied.
pub fn calculate_financial_summary(
    customer_id: &str,
    sales: &[Sale],
    purchases: &[Purchase],
    cash_transactions: &[CashTransaction],
) -> FinancialSummary {
    let customer_sales = || sales.iter().filter(|s| s.customer_id == customer_id);

    let pending_portal_amount: f64 = customer_sales().map(Sale::pending_portal_amount).sum();
    let positive_difference_amount: f64 = customer_sales().map(positive_difference).sum();
    let negative_difference_amount: f64 = customer_sales().map(negative_difference).sum();
    let pending_difference_amount = positive_difference_amount + negative_difference_amount;

    let pending_purchase_amount: f64 = purchases
        .iter()
        .filter(|p| p.customer_id == customer_id)
        .map(Purchase::pending_amount)
        .sum();

    let mut cash_in_amount = 0.0;
    let mut cash_out_amount = 0.0;
    for tx in balance_cash_transactions(customer_id, cash_transactions) {
        match tx.direction {
            CashDirection::Receive => cash_in_amount += tx.amount,
            CashDirection::Give => cash_out_amount += tx.amount,
        }
    }
    let impact = cash_transaction_impact(customer_id, cash_transactions);

    let net_balance =
        pending_portal_amount + pending_difference_amount - pending_purchase_amount + impact;

    FinancialSummary {
        pending_portal_amount,
        pending_difference_amount,
        pending_purchase_amount,
        net_balance,
        cash_in_amount,
        cash_out_amount,
        positive_difference_amount,
        negative_difference_amount,
    }
}

/// Signed effect of a customer's cash movements on the net balance.
///
/// Cash received lowers what the customer owes; cash given raises it.
pub fn cash_transaction_impact(customer_id: &str, cash_transactions: &[CashTransaction]) -> f64 {
    balance_cash_transactions(customer_id, cash_transactions)
        .map(|tx| match tx.direction {
            CashDirection::Receive => -tx.amount,
            CashDirection::Give => tx.amount,
        })
        .sum()
}

fn balance_cash_transactions<'a>(
    customer_id: &'a str,
    cash_transactions: &'a [CashTransaction],
) -> impl Iterator<Item = &'a CashTransaction> + 'a {
    cash_transactions
        .iter()
        .filter(move |tx| tx.customer_id == customer_id)
        .filter(|tx| tx.category().counts_toward_balance())
}

fn positive_difference(sale: &Sale) -> f64 {
    if sale.difference_amount > 0.0 {
        sale.difference_amount - sale.difference_amount_paid
    } else {
        0.0
    }
}

fn negative_difference(sale: &Sale) -> f64 {
    if sale.difference_amount < 0.0 {
        sale.difference_amount + sale.difference_amount_paid
    } else {
        0.0
    }
}
