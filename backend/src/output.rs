//! Output formatting: plain tables or pretty JSON

use anyhow::Result;
use plant_ledger::domain::commands::ledger::CustomerSummaryResult;
use plant_ledger::AppConfig;
use serde::Serialize;
use shared::{BillKind, Entity, LedgerResponse, PendingBillsResponse};

/// Renders amounts with the configured currency symbol and precision
pub struct AmountFormat {
    symbol: String,
    decimal_places: usize,
}

impl AmountFormat {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            symbol: config.currency_symbol.clone(),
            decimal_places: config.decimal_places as usize,
        }
    }

    pub fn format(&self, value: f64) -> String {
        let magnitude = format!("{:.*}", self.decimal_places, value.abs());
        // -0.00 reads as zero
        let is_zero = magnitude.chars().all(|c| c == '0' || c == '.');
        if value < 0.0 && !is_zero {
            format!("-{}{}", self.symbol, magnitude)
        } else {
            format!("{}{}", self.symbol, magnitude)
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_summary(result: &CustomerSummaryResult, fmt: &AmountFormat) {
    let s = &result.summary;
    println!("{} ({})", result.entity.name, result.entity.id);
    println!("{}", "-".repeat(40));
    println!("{:<28}{:>12}", "Pending portal", fmt.format(s.pending_portal_amount));
    println!("{:<28}{:>12}", "Pending difference", fmt.format(s.pending_difference_amount));
    println!("{:<28}{:>12}", "  owed to customer", fmt.format(s.positive_difference_amount));
    println!("{:<28}{:>12}", "  owed by customer", fmt.format(s.negative_difference_amount));
    println!("{:<28}{:>12}", "Pending purchases", fmt.format(s.pending_purchase_amount));
    println!("{:<28}{:>12}", "Cash received", fmt.format(s.cash_in_amount));
    println!("{:<28}{:>12}", "Cash given", fmt.format(s.cash_out_amount));
    println!("{}", "-".repeat(40));
    println!("{:<28}{:>12}", "Net balance", fmt.format(s.net_balance));
}

pub fn print_ledger(ledger: &LedgerResponse, fmt: &AmountFormat) {
    if ledger.rows.is_empty() {
        println!("No entries.");
        return;
    }

    println!(
        "{:<24} {:>14} {:>14} {:>14} {:>14}",
        "Name", "Portal", "Difference", "Purchase", "Net balance"
    );
    println!("{}", "-".repeat(84));
    for row in &ledger.rows {
        let s = &row.summary;
        println!(
            "{:<24} {:>14} {:>14} {:>14} {:>14}",
            truncate(&row.entity_name, 24),
            fmt.format(s.pending_portal_amount),
            fmt.format(s.pending_difference_amount),
            fmt.format(s.pending_purchase_amount),
            fmt.format(s.net_balance),
        );
    }
    println!("{}", "-".repeat(84));
    let t = &ledger.totals;
    println!(
        "{:<24} {:>14} {:>14} {:>14} {:>14}",
        "TOTAL",
        fmt.format(t.pending_portal_amount),
        fmt.format(t.pending_difference_amount),
        fmt.format(t.pending_purchase_amount),
        fmt.format(t.net_balance),
    );
}

pub fn print_pending_bills(response: &PendingBillsResponse, fmt: &AmountFormat) {
    if response.bills.is_empty() {
        println!("No pending bills.");
        return;
    }

    println!(
        "{:<10} {:<9} {:<24} {:>12} {:>12} {:>12}",
        "Date", "Kind", "Bill", "Total", "Paid", "Outstanding"
    );
    println!("{}", "-".repeat(84));
    for bill in &response.bills {
        let kind = match bill.kind {
            BillKind::Sale => "sale",
            BillKind::Purchase => "purchase",
        };
        println!(
            "{:<10} {:<9} {:<24} {:>12} {:>12} {:>12}",
            bill.date.format("%Y-%m-%d"),
            kind,
            truncate(&bill.bill_id, 24),
            fmt.format(bill.total),
            fmt.format(bill.paid),
            fmt.format(bill.outstanding),
        );
    }
    println!("{}", "-".repeat(84));
    println!(
        "Receivable: {} ({} sales)   Payable: {} ({} purchases)",
        fmt.format(response.total_receivable),
        response.sale_count,
        fmt.format(response.total_payable),
        response.purchase_count,
    );
}

pub fn print_entities(entities: &[Entity]) {
    if entities.is_empty() {
        println!("No entities.");
        return;
    }

    println!("{:<28} {:<9} {:<24} {}", "ID", "Type", "Name", "Phone");
    println!("{}", "-".repeat(80));
    for entity in entities {
        println!(
            "{:<28} {:<9} {:<24} {}",
            entity.id,
            entity.entity_type,
            truncate(&entity.name, 24),
            entity.phone
        );
    }
}

pub fn print_config(config: &AppConfig) -> Result<()> {
    print!("{}", serde_yaml::to_string(config)?);
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(symbol: &str, places: usize) -> AmountFormat {
        AmountFormat {
            symbol: symbol.to_string(),
            decimal_places: places,
        }
    }

    #[test]
    fn test_amount_format_places_sign_before_symbol() {
        let fmt = format("₹", 2);
        assert_eq!(fmt.format(630.0), "₹630.00");
        assert_eq!(fmt.format(-12.5), "-₹12.50");
    }

    #[test]
    fn test_amount_format_hides_negative_zero() {
        assert_eq!(format("", 2).format(-0.001), "0.00");
        assert_eq!(format("$", 0).format(-0.4), "$0");
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate("Green Valley", 24), "Green Valley");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
