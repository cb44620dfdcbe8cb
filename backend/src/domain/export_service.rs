//! Export of the ledger as a CSV report.
//!
//! The report has one line per ledger row followed by a `TOTAL` line. Amounts
//! are written with the configured number of decimal places and no currency
//! symbol so spreadsheets can read them as numbers.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use log::info;
use shared::LedgerResponse;
use std::fs;
use std::path::Path;

use crate::domain::commands::export::ExportLedgerResult;

const REPORT_HEADER: &[&str] = &[
    "entity_id",
    "entity_name",
    "pending_portal_amount",
    "pending_difference_amount",
    "pending_purchase_amount",
    "cash_in_amount",
    "cash_out_amount",
    "net_balance",
];

#[derive(Clone)]
pub struct ExportService {
    decimal_places: usize,
}

impl ExportService {
    pub fn new(decimal_places: u8) -> Self {
        Self {
            decimal_places: decimal_places as usize,
        }
    }

    /// Render the ledger as CSV text
    pub fn render_ledger_csv(&self, ledger: &LedgerResponse) -> Result<String> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(REPORT_HEADER)?;

        for row in &ledger.rows {
            let s = &row.summary;
            writer.write_record([
                row.entity_id.clone(),
                row.entity_name.clone(),
                self.amount(s.pending_portal_amount),
                self.amount(s.pending_difference_amount),
                self.amount(s.pending_purchase_amount),
                self.amount(s.cash_in_amount),
                self.amount(s.cash_out_amount),
                self.amount(s.net_balance),
            ])?;
        }

        let t = &ledger.totals;
        writer.write_record([
            String::new(),
            "TOTAL".to_string(),
            self.amount(t.pending_portal_amount),
            self.amount(t.pending_difference_amount),
            self.amount(t.pending_purchase_amount),
            String::new(),
            String::new(),
            self.amount(t.net_balance),
        ])?;

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to finish CSV report: {}", e))?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Write the ledger report to `path`, replacing any existing file
    pub fn export_ledger_to_path(&self, ledger: &LedgerResponse, path: &Path) -> Result<ExportLedgerResult> {
        info!("Exporting ledger with {} rows to {}", ledger.rows.len(), path.display());

        let content = self.render_ledger_csv(ledger)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        info!("Ledger exported to {}", path.display());
        Ok(ExportLedgerResult {
            path: path.to_path_buf(),
            row_count: ledger.rows.len(),
        })
    }

    fn amount(&self, value: f64) -> String {
        format!("{:.*}", self.decimal_places, value)
    }
}
