use clap::Parser;
use colored::Colorize;
use libris::config::LibrisConfig;
use libris::engine::Engine;
use libris::error::Result;
use libris::session::{AdminCredentials, Session};
use libris::store::fs::FileStore;
use libris::ui::ConsoleUi;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "error:".red(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let store = FileStore::new(&config);
    if store.ensure_catalog()? {
        println!(
            "{} created empty catalog at {}",
            "note:".yellow(),
            store.catalog_path().display()
        );
    }
    let engine = Engine::load(store)?;
    let mut session = Session::new(engine, ConsoleUi::stdout());

    match cli.command {
        Some(Commands::Admin) => {
            let mut creds = AdminCredentials::default();
            session.run_admin(&mut creds)
        }
        Some(Commands::Patron { name }) => session.run_patron(name),
        None => session.run_patron(None),
    }
}

/// File config (when given) with CLI flags layered on top.
fn resolve_config(cli: &Cli) -> Result<LibrisConfig> {
    let mut config = match &cli.config {
        Some(path) => LibrisConfig::load(path)?,
        None => LibrisConfig::default(),
    };
    if let Some(path) = &cli.catalog {
        config.catalog_path = path.clone();
    }
    if let Some(path) = &cli.transactions {
        config.transaction_log_path = path.clone();
    }
    if let Some(path) = &cli.ledger {
        config.borrow_ledger_path = path.clone();
    }
    Ok(config)
}
