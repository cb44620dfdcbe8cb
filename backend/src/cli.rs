//! CLI definition using clap

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use shared::{CashDirection, EntityType, LedgerSortField, SortDirection};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plant-ledger")]
#[command(version)]
#[command(about = "Customer balances, ledger and pending bills for a plant business")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (defaults to $PLANT_LEDGER_DATA_DIR or ~/Documents/Plant Ledger)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the financial summary of one customer
    Summary {
        customer_id: String,
    },

    /// Show the ledger across all customers (or suppliers)
    Ledger {
        #[command(flatten)]
        options: LedgerArgs,
    },

    /// List sales and purchases with money outstanding
    PendingBills {
        /// Only bills of this customer
        #[arg(long)]
        customer: Option<String>,
    },

    /// Write the ledger as a CSV report
    Export {
        path: PathBuf,

        #[command(flatten)]
        options: LedgerArgs,
    },

    /// List customers and suppliers
    Entities {
        #[arg(long, value_enum)]
        kind: Option<EntityKindArg>,
    },

    /// Add a customer or supplier
    AddEntity {
        name: String,

        #[arg(long, value_enum, default_value_t = EntityKindArg::Customer)]
        kind: EntityKindArg,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        address: String,
    },

    /// Record a sale
    AddSale {
        customer_id: String,

        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        portal_total: f64,

        #[arg(long, default_value_t = 0.0)]
        portal_paid: f64,

        /// Signed: positive when the business owes the customer
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        difference: f64,

        #[arg(long, default_value_t = 0.0)]
        difference_paid: f64,
    },

    /// Record a purchase
    AddPurchase {
        customer_id: String,

        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        grand_total: f64,

        #[arg(long, default_value_t = 0.0)]
        paid: f64,
    },

    /// Record a cash movement
    AddCash {
        customer_id: String,

        #[arg(long, value_enum)]
        direction: DirectionArg,

        #[arg(long)]
        amount: f64,

        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long, default_value = "")]
        note: String,
    },

    /// Show or change settings in app_config.yaml
    Config {
        #[arg(long)]
        business_name: Option<String>,

        #[arg(long)]
        currency_symbol: Option<String>,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
        decimal_places: Option<u8>,

        /// Default ledger sort column
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Default ledger sort direction
        #[arg(long, value_enum)]
        direction: Option<SortDirectionArg>,
    },
}

#[derive(clap::Args, Clone)]
pub struct LedgerArgs {
    /// Column to sort by (defaults to the configured sort)
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Sort descending
    #[arg(long, conflicts_with = "asc")]
    pub desc: bool,

    /// Sort ascending
    #[arg(long)]
    pub asc: bool,

    /// Only entities whose name contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Hide entities with nothing pending
    #[arg(long)]
    pub hide_settled: bool,

    /// List suppliers instead of customers
    #[arg(long)]
    pub suppliers: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    Portal,
    Difference,
    Purchase,
    Balance,
}

impl LedgerArgs {
    /// Explicit flags win over the configured direction
    pub fn direction(&self, configured: SortDirection) -> SortDirection {
        if self.desc {
            SortDirection::Descending
        } else if self.asc {
            SortDirection::Ascending
        } else {
            configured
        }
    }
}

impl From<SortArg> for LedgerSortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => LedgerSortField::CustomerName,
            SortArg::Portal => LedgerSortField::PendingPortalAmount,
            SortArg::Difference => LedgerSortField::PendingDifferenceAmount,
            SortArg::Purchase => LedgerSortField::PendingPurchaseAmount,
            SortArg::Balance => LedgerSortField::NetBalance,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortDirectionArg {
    Asc,
    Desc,
}

impl From<SortDirectionArg> for SortDirection {
    fn from(arg: SortDirectionArg) -> Self {
        match arg {
            SortDirectionArg::Asc => SortDirection::Ascending,
            SortDirectionArg::Desc => SortDirection::Descending,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EntityKindArg {
    Customer,
    Supplier,
}

impl From<EntityKindArg> for EntityType {
    fn from(arg: EntityKindArg) -> Self {
        match arg {
            EntityKindArg::Customer => EntityType::Customer,
            EntityKindArg::Supplier => EntityType::Supplier,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Receive,
    Give,
}

impl From<DirectionArg> for CashDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Receive => CashDirection::Receive,
            DirectionArg::Give => CashDirection::Give,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ledger_flags() {
        let cli = Cli::parse_from([
            "plant-ledger",
            "ledger",
            "--sort",
            "portal",
            "--asc",
            "--search",
            "green",
            "--json",
        ]);
        assert!(cli.json);
        match cli.command {
            Commands::Ledger { options } => {
                assert_eq!(options.sort, Some(SortArg::Portal));
                assert!(options.asc);
                assert!(!options.desc);
                assert_eq!(options.search.as_deref(), Some("green"));
            }
            _ => panic!("expected ledger command"),
        }
    }

    #[test]
    fn test_direction_falls_back_to_config() {
        let cli = Cli::parse_from(["plant-ledger", "export", "out.csv"]);
        match cli.command {
            Commands::Export { options, .. } => {
                assert_eq!(options.direction(SortDirection::Ascending), SortDirection::Ascending);
            }
            _ => panic!("expected export command"),
        }

        let cli = Cli::parse_from(["plant-ledger", "ledger", "--desc"]);
        match cli.command {
            Commands::Ledger { options } => {
                assert_eq!(options.direction(SortDirection::Ascending), SortDirection::Descending);
            }
            _ => panic!("expected ledger command"),
        }
    }

    #[test]
    fn test_parse_negative_difference() {
        let cli = Cli::parse_from([
            "plant-ledger",
            "add-sale",
            "customer::1",
            "--portal-total",
            "500",
            "--difference",
            "-75.5",
            "--date",
            "2024-03-01",
        ]);
        match cli.command {
            Commands::AddSale { difference, date, .. } => {
                assert_eq!(difference, -75.5);
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1));
            }
            _ => panic!("expected add-sale command"),
        }
    }
}
