//! Recording of sales, purchases and cash transactions.
//!
//! Every record must belong to an existing entity. Amounts must be finite;
//! totals and payments cannot be negative. Only a sale's difference amount is
//! signed.

use anyhow::Result;
use chrono::Utc;
use log::info;
use shared::{CashTransaction, Purchase, Sale};
use std::sync::Arc;

use crate::domain::commands::transactions::{
    RecordCashTransactionCommand, RecordPurchaseCommand, RecordSaleCommand,
};
use crate::domain::id::generate_id;
use crate::error::DomainError;
use crate::storage::csv::{
    CashTransactionRepository, CsvConnection, EntityRepository, PurchaseRepository, SaleRepository,
};
use crate::storage::traits::{CashTransactionStorage, EntityStorage, PurchaseStorage, SaleStorage};

#[derive(Clone)]
pub struct TransactionService {
    entity_repository: EntityRepository,
    sale_repository: SaleRepository,
    purchase_repository: PurchaseRepository,
    cash_repository: CashTransactionRepository,
}

impl TransactionService {
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        Self {
            entity_repository: EntityRepository::new(csv_conn.clone()),
            sale_repository: SaleRepository::new(csv_conn.clone()),
            purchase_repository: PurchaseRepository::new(csv_conn.clone()),
            cash_repository: CashTransactionRepository::new(csv_conn),
        }
    }

    pub fn record_sale(&self, command: RecordSaleCommand) -> Result<Sale> {
        self.ensure_entity_exists(&command.customer_id)?;
        require_finite("difference_amount", command.difference_amount)?;
        require_non_negative("total_portal_amount", command.total_portal_amount)?;
        require_non_negative("portal_amount_paid", command.portal_amount_paid)?;
        require_non_negative("difference_amount_paid", command.difference_amount_paid)?;

        let existing = self.sale_repository.list_sales()?;
        let sale = Sale {
            id: generate_id("sale", now_millis(), existing.iter().map(|s| s.id.as_str())),
            customer_id: command.customer_id,
            date: command.date,
            total_portal_amount: command.total_portal_amount,
            portal_amount_paid: command.portal_amount_paid,
            difference_amount: command.difference_amount,
            difference_amount_paid: command.difference_amount_paid,
        };

        self.sale_repository.store_sale(&sale)?;
        info!(
            "Recorded sale {}: portal {:.2} (paid {:.2}), difference {:.2} (paid {:.2})",
            sale.id,
            sale.total_portal_amount,
            sale.portal_amount_paid,
            sale.difference_amount,
            sale.difference_amount_paid
        );
        Ok(sale)
    }

    pub fn record_purchase(&self, command: RecordPurchaseCommand) -> Result<Purchase> {
        self.ensure_entity_exists(&command.customer_id)?;
        require_non_negative("grand_total", command.grand_total)?;
        require_non_negative("amount_paid", command.amount_paid)?;

        let existing = self.purchase_repository.list_purchases()?;
        let purchase = Purchase {
            id: generate_id("purchase", now_millis(), existing.iter().map(|p| p.id.as_str())),
            customer_id: command.customer_id,
            date: command.date,
            grand_total: command.grand_total,
            amount_paid: command.amount_paid,
        };

        self.purchase_repository.store_purchase(&purchase)?;
        info!(
            "Recorded purchase {}: total {:.2}, paid {:.2}",
            purchase.id, purchase.grand_total, purchase.amount_paid
        );
        Ok(purchase)
    }

    pub fn record_cash_transaction(&self, command: RecordCashTransactionCommand) -> Result<CashTransaction> {
        self.ensure_entity_exists(&command.customer_id)?;
        require_finite("amount", command.amount)?;
        if command.amount <= 0.0 {
            return Err(DomainError::InvalidAmount {
                field: "amount",
                value: command.amount,
            }
            .into());
        }

        let existing = self.cash_repository.list_cash_transactions()?;
        let transaction = CashTransaction {
            id: generate_id("cash", now_millis(), existing.iter().map(|t| t.id.as_str())),
            customer_id: command.customer_id,
            date: command.date,
            amount: command.amount,
            direction: command.direction,
            note: command.note.trim().to_string(),
        };

        self.cash_repository.store_cash_transaction(&transaction)?;
        info!(
            "Recorded cash transaction {}: {} {:.2} ({:?})",
            transaction.id,
            transaction.direction,
            transaction.amount,
            transaction.category()
        );
        Ok(transaction)
    }

    fn ensure_entity_exists(&self, entity_id: &str) -> Result<()> {
        if self.entity_repository.get_entity(entity_id)?.is_none() {
            return Err(DomainError::EntityNotFound(entity_id.to_string()).into());
        }
        Ok(())
    }
}

fn now_millis() -> u64 {
    Utc::now().timestamp_millis() as u64
}

fn require_finite(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(DomainError::InvalidAmount { field, value }.into());
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(DomainError::InvalidAmount { field, value }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::{sample_entity, test_date, TestEnvironment};
    use shared::{CashCategory, CashDirection, EntityType};

    fn setup() -> Result<(TestEnvironment, TransactionService)> {
        let env = TestEnvironment::new()?;
        EntityRepository::new(env.connection.clone())
            .store_entity(&sample_entity("customer::1", "Green Valley", EntityType::Customer))?;
        let service = TransactionService::new(env.connection.clone());
        Ok((env, service))
    }

    fn sale_command(customer_id: &str) -> RecordSaleCommand {
        RecordSaleCommand {
            customer_id: customer_id.to_string(),
            date: test_date(),
            total_portal_amount: 1000.0,
            portal_amount_paid: 400.0,
            difference_amount: -100.0,
            difference_amount_paid: 20.0,
        }
    }

    #[test]
    fn test_record_sale_persists_signed_difference() -> Result<()> {
        let (env, service) = setup()?;

        let sale = service.record_sale(sale_command("customer::1"))?;

        assert!(sale.id.starts_with("sale::"));
        let stored = SaleRepository::new(env.connection.clone()).list_sales()?;
        assert_eq!(stored, vec![sale]);
        assert_eq!(stored[0].difference_amount, -100.0);
        Ok(())
    }

    #[test]
    fn test_record_for_unknown_customer_fails() -> Result<()> {
        let (_env, service) = setup()?;

        let err = service.record_sale(sale_command("customer::2")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::EntityNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_negative_totals_are_rejected() -> Result<()> {
        let (_env, service) = setup()?;

        let err = service
            .record_purchase(RecordPurchaseCommand {
                customer_id: "customer::1".to_string(),
                date: test_date(),
                grand_total: -5.0,
                amount_paid: 0.0,
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::InvalidAmount { field: "grand_total", .. })
        ));

        let mut nan_sale = sale_command("customer::1");
        nan_sale.difference_amount = f64::NAN;
        assert!(service.record_sale(nan_sale).is_err());
        Ok(())
    }

    #[test]
    fn test_cash_transaction_requires_positive_amount() -> Result<()> {
        let (_env, service) = setup()?;

        let zero = RecordCashTransactionCommand {
            customer_id: "customer::1".to_string(),
            date: test_date(),
            amount: 0.0,
            direction: CashDirection::Receive,
            note: String::new(),
        };
        assert!(service.record_cash_transaction(zero).is_err());

        let tagged = RecordCashTransactionCommand {
            customer_id: "customer::1".to_string(),
            date: test_date(),
            amount: 250.0,
            direction: CashDirection::Give,
            note: "  Cash Out from Purchase Module ".to_string(),
        };
        let tx = service.record_cash_transaction(tagged)?;
        assert_eq!(tx.note, "Cash Out from Purchase Module");
        assert_eq!(tx.category(), CashCategory::PurchaseModuleCashOut);
        Ok(())
    }
}
