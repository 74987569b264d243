use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::keywords::UNCATEGORIZED;
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowDirection {
    Debit,
    Credit,
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowDirection::Debit => write!(f, "Debit"),
            FlowDirection::Credit => write!(f, "Credit"),
        }
    }
}

impl std::str::FromStr for FlowDirection {
    type Err = String;

    // Statement exports carry exactly "Debit" or "Credit".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Debit" => Ok(FlowDirection::Debit),
            "Credit" => Ok(FlowDirection::Credit),
            other => Err(format!("unknown flow direction: '{other}'")),
        }
    }
}

/// One statement row. The detail text doubles as the join key into the
/// keyword store; `category` starts as `Uncategorized` until a matcher or a
/// user correction relabels it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub detail: String,
    pub amount: Money,
    pub direction: FlowDirection,
    pub category: String,
}

impl Transaction {
    pub fn new(date: NaiveDate, detail: &str, amount: Money, direction: FlowDirection) -> Self {
        Transaction {
            date,
            detail: detail.to_string(),
            amount,
            direction,
            category: UNCATEGORIZED.to_string(),
        }
    }
}
