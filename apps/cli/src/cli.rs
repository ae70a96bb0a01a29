//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pricer_core::AmountKind;
use pricer_io::export::STDOUT_PATH;
use pricer_io::ProductRow;

use crate::config::FeeOverrides;

/// Solve marketplace selling prices for a target profit.
#[derive(Debug, Parser)]
#[command(name = "pricer", version)]
pub struct Cli {
    /// Config file (defaults to pricer.toml in the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub fees: FeeArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Fee rates that override the config file and environment.
#[derive(Debug, Clone, Default, Args)]
pub struct FeeArgs {
    /// Marketplace service fee, percent
    #[arg(long, global = true, value_name = "PCT")]
    pub msf: Option<f64>,

    /// Payment processing fee, percent
    #[arg(long, global = true, value_name = "PCT")]
    pub payment: Option<f64>,

    /// Premium program fee, percent (capped per item)
    #[arg(long, global = true, value_name = "PCT")]
    pub premium: Option<f64>,

    /// Campaign voucher fee, percent
    #[arg(long, global = true, value_name = "PCT")]
    pub campaign: Option<f64>,
}

impl From<&FeeArgs> for FeeOverrides {
    fn from(args: &FeeArgs) -> Self {
        FeeOverrides {
            msf_pct: args.msf,
            payment_pct: args.payment,
            premium_pct: args.premium,
            campaign_pct: args.campaign,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price one item entered on the command line; prints JSON
    Solve(SolveArgs),

    /// Price every row of a CSV, JSON or Excel product list
    Batch(BatchArgs),

    /// Write an empty import sheet (header row only)
    Template {
        /// Output file, or - for stdout
        #[arg(short, long, default_value = STDOUT_PATH)]
        output: PathBuf,
    },
}

/// One item, as the manual entry form would take it.
#[derive(Debug, Clone, Args)]
pub struct SolveArgs {
    #[arg(long)]
    pub sku: String,

    /// Product cost, THB
    #[arg(long, allow_negative_numbers = true)]
    pub cost: f64,

    /// Packaging or shipping added to the cost, THB
    #[arg(long, default_value_t = 0.0)]
    pub extra_cost: f64,

    /// Seller discount
    #[arg(long, default_value_t = 0.0)]
    pub seller_disc: f64,

    /// Seller discount type: % or THB
    #[arg(long, default_value = "%")]
    pub seller_disc_type: AmountKind,

    /// Mandatory discount (config default when omitted)
    #[arg(long)]
    pub mand_disc: Option<f64>,

    /// Mandatory discount type: % or THB
    #[arg(long, default_value = "%")]
    pub mand_disc_type: AmountKind,

    /// Target profit
    #[arg(long, allow_negative_numbers = true)]
    pub target: f64,

    /// Target type: % of price or THB
    #[arg(long, default_value = "%")]
    pub target_type: AmountKind,
}

impl SolveArgs {
    /// Builds the spreadsheet row this entry corresponds to, so manual and
    /// file input share one normalization path.
    pub fn to_row(&self) -> ProductRow {
        let text = |v: f64| Some(v.to_string());
        let label = |k: AmountKind| Some(k.label().to_string());

        ProductRow {
            sku: Some(self.sku.clone()),
            cost: text(self.cost),
            extra_cost: text(self.extra_cost),
            seller_disc: text(self.seller_disc),
            seller_disc_type: label(self.seller_disc_type),
            mand_disc: self.mand_disc.and_then(text),
            mand_disc_type: label(self.mand_disc_type),
            target_profit: text(self.target),
            target_type: label(self.target_type),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// Product list (.csv, .json, .xlsx or .xls)
    pub input: PathBuf,

    /// Report file (.csv, .json or .xlsx), or - for CSV on stdout
    #[arg(short, long, default_value = STDOUT_PATH)]
    pub output: PathBuf,

    /// Keep only SKUs containing this text (case-insensitive)
    #[arg(short, long, value_name = "TERM")]
    pub filter: Option<String>,
}
