use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "libris")]
#[command(about = "Terminal-driven library inventory manager", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Load paths from a JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the catalog CSV file
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Path to the transaction log CSV file
    #[arg(long, global = true)]
    pub transactions: Option<PathBuf>,

    /// Path to the borrow ledger CSV file
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a patron session (borrow, return, buy)
    Patron {
        /// Patron name (prompted when omitted)
        #[arg(long)]
        name: Option<String>,
    },

    /// Start an administrator session (add, remove, reports)
    Admin,
}
