use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use pigeonhole_core::{
    summarize, total, FlowDirection, KeywordRepository, KeywordStore, Transaction,
};
use pigeonhole_engine::{categorize, create_category, parse_statement_path};
use pigeonhole_storage::JsonFileRepository;

#[derive(Parser)]
#[command(name = "pigeonhole", version, about = "Sorts bank-statement exports into spending categories")]
pub struct Cli {
    /// Keyword dictionary location.
    #[arg(long, global = true, default_value = "categories.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Label every transaction in a statement export.
    Categorize { statement: PathBuf },
    /// Per-category totals for one flow direction, largest first.
    Summary {
        statement: PathBuf,
        #[arg(long, value_enum, default_value = "debit")]
        direction: DirectionArg,
    },
    /// List categories and their keywords.
    Categories,
    /// Create an empty category.
    AddCategory { name: String },
    /// Attach a keyword to a category.
    AddKeyword { category: String, keyword: String },
    /// Record a manual correction: this detail text belongs to that
    /// category from now on.
    Learn { detail: String, category: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Debit,
    Credit,
}

impl From<DirectionArg> for FlowDirection {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Debit => FlowDirection::Debit,
            DirectionArg::Credit => FlowDirection::Credit,
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let repository = JsonFileRepository::new(&cli.store);

    match cli.command {
        Command::Categorize { statement } => {
            let store = repository.load()?;
            for tx in load_labeled(&statement, &store)? {
                println!(
                    "{}  {:>10}  {:<6}  {:<24}  {}",
                    tx.date.format("%d %b %Y"),
                    tx.amount.to_string(),
                    tx.direction.to_string(),
                    tx.category,
                    tx.detail
                );
            }
        }
        Command::Summary { statement, direction } => {
            let store = repository.load()?;
            let transactions = load_labeled(&statement, &store)?;
            let direction = FlowDirection::from(direction);
            for (category, amount) in summarize(&transactions, direction) {
                println!("{:>12}  {category}", amount.to_string());
            }
            println!("{:>12}  total", total(&transactions, direction).to_string());
        }
        Command::Categories => {
            let store = repository.load()?;
            for category in store.categories() {
                println!("{}: {}", category.name(), category.keywords().join(", "));
            }
        }
        Command::AddCategory { name } => {
            let mut store = repository.load()?;
            if create_category(&mut store, &repository, &name)? {
                println!("created \"{}\"", name.trim());
            } else {
                println!("\"{}\" already exists", name.trim());
            }
        }
        Command::AddKeyword { category, keyword } | Command::Learn { category, detail: keyword } => {
            let mut store = repository.load()?;
            if store.add_keyword(&category, &keyword) {
                repository.save(&store)?;
                println!("\"{}\" now files under \"{category}\"", keyword.trim());
            } else {
                println!("\"{category}\" already knows \"{}\"", keyword.trim());
            }
        }
    }

    Ok(())
}

fn load_labeled(statement: &Path, store: &KeywordStore) -> anyhow::Result<Vec<Transaction>> {
    let transactions = parse_statement_path(statement)
        .with_context(|| format!("reading statement {}", statement.display()))?;
    Ok(categorize(transactions, store))
}
