use anyhow::Result;
use log::info;
use shared::{BillKind, PendingBill, PendingBillsResponse, Purchase, Sale};
use std::sync::Arc;

use crate::domain::ledger_service::SETTLED_EPSILON;
use crate::storage::csv::{CsvConnection, PurchaseRepository, SaleRepository};
use crate::storage::traits::{PurchaseStorage, SaleStorage};

/// Lists sales and purchases that still have money outstanding
#[derive(Clone)]
pub struct PendingBillService {
    sale_repository: SaleRepository,
    purchase_repository: PurchaseRepository,
}

impl PendingBillService {
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        Self {
            sale_repository: SaleRepository::new(csv_conn.clone()),
            purchase_repository: PurchaseRepository::new(csv_conn),
        }
    }

    /// Pending bills for one customer, or for everyone when `customer_id` is None
    pub fn list_pending_bills(&self, customer_id: Option<&str>) -> Result<PendingBillsResponse> {
        let sales = self.sale_repository.list_sales()?;
        let purchases = self.purchase_repository.list_purchases()?;

        let response = collect_pending_bills(customer_id, &sales, &purchases);
        info!(
            "Found {} pending sales and {} pending purchases",
            response.sale_count, response.purchase_count
        );
        Ok(response)
    }
}

/// Collect unpaid bills oldest first; sales come before purchases on the same day
pub fn collect_pending_bills(
    customer_id: Option<&str>,
    sales: &[Sale],
    purchases: &[Purchase],
) -> PendingBillsResponse {
    let belongs = |id: &str| customer_id.map_or(true, |wanted| wanted == id);

    let mut bills: Vec<PendingBill> = sales
        .iter()
        .filter(|s| belongs(s.customer_id.as_str()))
        .filter(|s| s.pending_portal_amount() > SETTLED_EPSILON)
        .map(|s| PendingBill {
            kind: BillKind::Sale,
            bill_id: s.id.clone(),
            customer_id: s.customer_id.clone(),
            date: s.date,
            total: s.total_portal_amount,
            paid: s.portal_amount_paid,
            outstanding: s.pending_portal_amount(),
        })
        .chain(
            purchases
                .iter()
                .filter(|p| belongs(p.customer_id.as_str()))
                .filter(|p| p.pending_amount() > SETTLED_EPSILON)
                .map(|p| PendingBill {
                    kind: BillKind::Purchase,
                    bill_id: p.id.clone(),
                    customer_id: p.customer_id.clone(),
                    date: p.date,
                    total: p.grand_total,
                    paid: p.amount_paid,
                    outstanding: p.pending_amount(),
                }),
        )
        .collect();

    bills.sort_by_key(|b| b.date);

    let mut response = PendingBillsResponse {
        bills: Vec::new(),
        sale_count: 0,
        purchase_count: 0,
        total_receivable: 0.0,
        total_payable: 0.0,
    };
    for bill in &bills {
        match bill.kind {
            BillKind::Sale => {
                response.sale_count += 1;
                response.total_receivable += bill.outstanding;
            }
            BillKind::Purchase => {
                response.purchase_count += 1;
                response.total_payable += bill.outstanding;
            }
        }
    }
    response.bills = bills;
    response
}
