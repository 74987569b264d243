use pigeonhole_core::{normalize, KeywordStore, Transaction, UNCATEGORIZED};

/// A category with its keywords pre-normalized, so a statement run lowers
/// each keyword once instead of once per transaction.
struct CompiledCategory {
    name: String,
    keywords: Vec<String>,
}

pub struct KeywordMatcher {
    categories: Vec<CompiledCategory>,
}

impl KeywordMatcher {
    /// Compiles a store snapshot. `Uncategorized` and categories without
    /// keywords take no part in matching.
    pub fn new(store: &KeywordStore) -> Self {
        let categories = store
            .categories()
            .filter(|category| category.name() != UNCATEGORIZED && !category.keywords().is_empty())
            .map(|category| CompiledCategory {
                name: category.name().to_string(),
                keywords: category.keywords().iter().map(|k| normalize(k)).collect(),
            })
            .collect();
        KeywordMatcher { categories }
    }

    /// The category owning `detail`, if any keyword equals its normalized
    /// text. Categories are checked in store order and the last match wins:
    /// a keyword listed under two categories resolves to the later one.
    pub fn match_detail(&self, detail: &str) -> Option<&str> {
        let detail = normalize(detail);
        self.categories
            .iter()
            .filter(|category| category.keywords.iter().any(|keyword| *keyword == detail))
            .last()
            .map(|category| category.name.as_str())
    }

    /// Relabels every transaction, replacing any previous assignment.
    pub fn apply(&self, mut transactions: Vec<Transaction>) -> Vec<Transaction> {
        for transaction in &mut transactions {
            transaction.category = self
                .match_detail(&transaction.detail)
                .unwrap_or(UNCATEGORIZED)
                .to_string();
        }
        transactions
    }
}

/// Labels a transaction batch against the store and hands it back.
pub fn categorize(transactions: Vec<Transaction>, store: &KeywordStore) -> Vec<Transaction> {
    let transactions = KeywordMatcher::new(store).apply(transactions);
    tracing::debug!(
        matched = transactions.iter().filter(|t| t.category != UNCATEGORIZED).count(),
        total = transactions.len(),
        "labeled statement"
    );
    transactions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pigeonhole_core::{FlowDirection, Money};

    fn tx(detail: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            detail,
            Money::from_cents(1234),
            FlowDirection::Debit,
        )
    }

    fn store(entries: &[(&str, &[&str])]) -> KeywordStore {
        let mut store = KeywordStore::new();
        for (category, keywords) in entries {
            store.add_category(category);
            for keyword in *keywords {
                store.add_keyword(category, keyword);
            }
        }
        store
    }

    #[test]
    fn assigns_on_exact_normalized_match() {
        let store = store(&[("Groceries", &["tesco store 123"])]);
        let labeled = categorize(vec![tx("Tesco Store 123")], &store);
        assert_eq!(labeled[0].category, "Groceries");
    }

    #[test]
    fn matching_ignores_case_and_surrounding_whitespace() {
        let store = store(&[("Groceries", &["Tesco"])]);
        let labeled = categorize(vec![tx("  tesco  ")], &store);
        assert_eq!(labeled[0].category, "Groceries");
    }

    #[test]
    fn no_substring_matching() {
        let store = store(&[("Groceries", &["Tesco"])]);
        let labeled = categorize(vec![tx("Tesco Store 123")], &store);
        assert_eq!(labeled[0].category, UNCATEGORIZED);
    }

    #[test]
    fn empty_categories_are_never_assigned() {
        let mut empty = KeywordStore::new();
        empty.add_category("Groceries");
        let labeled = categorize(vec![tx("Groceries")], &empty);
        assert_eq!(labeled[0].category, UNCATEGORIZED);
    }

    #[test]
    fn uncategorized_keywords_are_never_matched() {
        let mut store = KeywordStore::new();
        store.add_keyword(UNCATEGORIZED, "Tesco");
        let labeled = categorize(vec![tx("Tesco")], &store);
        assert_eq!(labeled[0].category, UNCATEGORIZED);
    }

    #[test]
    fn later_category_wins_a_shared_keyword() {
        let store = store(&[
            ("Groceries", &["Tesco"]),
            ("Eating Out", &["Tesco"]),
        ]);
        let labeled = categorize(vec![tx("Tesco")], &store);
        assert_eq!(labeled[0].category, "Eating Out");
    }

    #[test]
    fn previous_assignments_are_replaced() {
        let store = store(&[("Groceries", &["Tesco"])]);
        let mut stale = tx("Tesco");
        stale.category = "Transport".to_string();
        let mut unmatched = tx("Cinema");
        unmatched.category = "Transport".to_string();
        let labeled = categorize(vec![stale, unmatched], &store);
        assert_eq!(labeled[0].category, "Groceries");
        assert_eq!(labeled[1].category, UNCATEGORIZED);
    }

    #[test]
    fn order_and_count_are_preserved() {
        let store = store(&[("Groceries", &["Aldi"])]);
        let labeled = categorize(vec![tx("Aldi"), tx("Pret"), tx("Aldi")], &store);
        assert_eq!(labeled.len(), 3);
        assert_eq!(labeled[0].detail, "Aldi");
        assert_eq!(labeled[1].detail, "Pret");
        assert_eq!(labeled[2].detail, "Aldi");
    }
}
