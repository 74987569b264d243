use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use pigeonhole_core::{FlowDirection, Money, Transaction};

/// Statement dates look like "05 Jan 2024".
pub const DATE_FORMAT: &str = "%d %b %Y";

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column: {0}")]
    MissingColumn(String),
    #[error("invalid date \"{0}\": expected the form \"05 Jan 2024\"")]
    InvalidDate(String),
    #[error("invalid amount \"{0}\": expected a non-negative decimal")]
    InvalidAmount(String),
    #[error("invalid flow direction \"{0}\": expected \"Debit\" or \"Credit\"")]
    InvalidDirection(String),
}

/// Parses a statement export into transactions, all labeled
/// `Uncategorized`. One bad row fails the whole parse; a partially imported
/// statement is worse than an error the user can fix.
pub fn parse_statement<R: Read>(data: R) -> Result<Vec<Transaction>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| ParseError::MissingColumn(name.to_string()))
    };
    let date_column = column("Date")?;
    let details_column = column("Details")?;
    let amount_column = column("Amount")?;
    let direction_column = column("Debit/Credit")?;

    let mut transactions = Vec::new();
    for result in reader.records() {
        let record = result?;
        let date = parse_date(record.get(date_column).unwrap_or_default())?;
        let detail = record.get(details_column).unwrap_or_default();
        let amount = parse_amount(record.get(amount_column).unwrap_or_default())?;
        let direction = parse_direction(record.get(direction_column).unwrap_or_default())?;
        transactions.push(Transaction::new(date, detail, amount, direction));
    }

    Ok(transactions)
}

pub fn parse_statement_path(path: &Path) -> Result<Vec<Transaction>, ParseError> {
    parse_statement(File::open(path)?)
}

fn parse_date(field: &str) -> Result<NaiveDate, ParseError> {
    let field = field.trim();
    NaiveDate::parse_from_str(field, DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(field.to_string()))
}

fn parse_amount(field: &str) -> Result<Money, ParseError> {
    let field = field.trim();
    // "," is a thousands separator in these exports.
    let cleaned = field.replace(',', "");
    let amount =
        Decimal::from_str(&cleaned).map_err(|_| ParseError::InvalidAmount(field.to_string()))?;
    if amount.is_sign_negative() {
        return Err(ParseError::InvalidAmount(field.to_string()));
    }
    Ok(Money::from_decimal(amount))
}

fn parse_direction(field: &str) -> Result<FlowDirection, ParseError> {
    let field = field.trim();
    FlowDirection::from_str(field).map_err(|_| ParseError::InvalidDirection(field.to_string()))
}
