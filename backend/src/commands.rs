//! Command dispatch for the CLI

use anyhow::Result;
use chrono::{Local, NaiveDate};
use plant_ledger::domain::commands::entity::CreateEntityCommand;
use plant_ledger::domain::commands::transactions::{
    RecordCashTransactionCommand, RecordPurchaseCommand, RecordSaleCommand,
};
use plant_ledger::Backend;
use serde_json::json;
use shared::{EntityType, LedgerRequest};
use tracing::info;

use crate::cli::{Cli, Commands, LedgerArgs};
use crate::output::{self, AmountFormat};

pub fn execute(cli: Cli) -> Result<()> {
    let mut backend = Backend::new(cli.data_dir)?;
    let json = cli.json;
    let fmt = AmountFormat::from_config(&backend.config);

    match cli.command {
        Commands::Summary { customer_id } => {
            let result = backend.ledger_service.customer_summary(&customer_id)?;
            if json {
                output::print_json(&json!({
                    "entity": result.entity,
                    "summary": result.summary,
                }))?;
            } else {
                output::print_summary(&result, &fmt);
            }
        }

        Commands::Ledger { options } => {
            let request = ledger_request(&backend, &options);
            let ledger = backend.ledger_service.build_ledger(&request)?;
            if json {
                output::print_json(&ledger)?;
            } else {
                output::print_ledger(&ledger, &fmt);
            }
        }

        Commands::PendingBills { customer } => {
            let response = backend.pending_bill_service.list_pending_bills(customer.as_deref())?;
            if json {
                output::print_json(&response)?;
            } else {
                output::print_pending_bills(&response, &fmt);
            }
        }

        Commands::Export { path, options } => {
            let request = ledger_request(&backend, &options);
            let ledger = backend.ledger_service.build_ledger(&request)?;
            let result = backend.export_service.export_ledger_to_path(&ledger, &path)?;
            if json {
                output::print_json(&json!({
                    "path": result.path,
                    "row_count": result.row_count,
                }))?;
            } else {
                println!("Exported {} rows to {}", result.row_count, result.path.display());
            }
        }

        Commands::Entities { kind } => {
            let entities = match kind {
                Some(kind) => backend.entity_service.list_entities_by_type(kind.into())?,
                None => backend.entity_service.list_entities()?,
            };
            if json {
                output::print_json(&entities)?;
            } else {
                output::print_entities(&entities);
            }
        }

        Commands::AddEntity { name, kind, phone, address } => {
            let entity = backend.entity_service.create_entity(CreateEntityCommand {
                name,
                entity_type: kind.into(),
                phone,
                address,
            })?;
            print_created(json, &entity, &entity.id)?;
        }

        Commands::AddSale {
            customer_id,
            date,
            portal_total,
            portal_paid,
            difference,
            difference_paid,
        } => {
            let sale = backend.transaction_service.record_sale(RecordSaleCommand {
                customer_id,
                date: date.unwrap_or_else(today),
                total_portal_amount: portal_total,
                portal_amount_paid: portal_paid,
                difference_amount: difference,
                difference_amount_paid: difference_paid,
            })?;
            print_created(json, &sale, &sale.id)?;
        }

        Commands::AddPurchase { customer_id, date, grand_total, paid } => {
            let purchase = backend.transaction_service.record_purchase(RecordPurchaseCommand {
                customer_id,
                date: date.unwrap_or_else(today),
                grand_total,
                amount_paid: paid,
            })?;
            print_created(json, &purchase, &purchase.id)?;
        }

        Commands::AddCash { customer_id, direction, amount, date, note } => {
            let transaction = backend
                .transaction_service
                .record_cash_transaction(RecordCashTransactionCommand {
                    customer_id,
                    date: date.unwrap_or_else(today),
                    amount,
                    direction: direction.into(),
                    note,
                })?;
            print_created(json, &transaction, &transaction.id)?;
        }

        Commands::Config {
            business_name,
            currency_symbol,
            decimal_places,
            sort,
            direction,
        } => {
            let mut config = backend.config.clone();
            let mut changed = false;
            if let Some(name) = business_name {
                config.business_name = name;
                changed = true;
            }
            if let Some(symbol) = currency_symbol {
                config.currency_symbol = symbol;
                changed = true;
            }
            if let Some(places) = decimal_places {
                config.decimal_places = places;
                changed = true;
            }
            if let Some(sort) = sort {
                config.default_sort_field = sort.into();
                changed = true;
            }
            if let Some(direction) = direction {
                config.default_sort_direction = direction.into();
                changed = true;
            }

            if changed {
                backend.config = backend.config_repository.update(&config)?;
                info!("Configuration updated");
            }

            if json {
                output::print_json(&backend.config)?;
            } else {
                output::print_config(&backend.config)?;
            }
        }
    }

    Ok(())
}

/// Sort and direction fall back to the configured defaults
fn ledger_request(backend: &Backend, options: &LedgerArgs) -> LedgerRequest {
    LedgerRequest {
        entity_type: if options.suppliers {
            EntityType::Supplier
        } else {
            EntityType::Customer
        },
        sort_field: options
            .sort
            .map(Into::into)
            .unwrap_or(backend.config.default_sort_field),
        sort_direction: options.direction(backend.config.default_sort_direction),
        search: options.search.clone(),
        hide_settled: options.hide_settled,
    }
}

fn print_created<T: serde::Serialize>(json: bool, record: &T, id: &str) -> Result<()> {
    if json {
        output::print_json(record)
    } else {
        println!("Created {}", id);
        Ok(())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
