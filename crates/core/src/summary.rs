use super::money::Money;
use super::transaction::{FlowDirection, Transaction};

/// Per-category totals for one flow direction, sorted descending by amount.
/// Ties keep first-seen category order (the sort is stable).
pub fn summarize(transactions: &[Transaction], direction: FlowDirection) -> Vec<(String, Money)> {
    let mut totals: Vec<(String, Money)> = Vec::new();
    for tx in transactions.iter().filter(|tx| tx.direction == direction) {
        match totals.iter().position(|(category, _)| *category == tx.category) {
            Some(index) => totals[index].1 = totals[index].1 + tx.amount,
            None => totals.push((tx.category.clone(), tx.amount)),
        }
    }
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

/// Grand total for one flow direction.
pub fn total(transactions: &[Transaction], direction: FlowDirection) -> Money {
    transactions
        .iter()
        .filter(|tx| tx.direction == direction)
        .map(|tx| tx.amount)
        .fold(Money::zero(), |a, b| a + b)
}
