use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fallback label for transactions no keyword claims. Always present in the
/// store, never matched against.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Lower-cases and trims text. Keywords and transaction details go through
/// the same normalization before they are compared.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    name: String,
    keywords: Vec<String>,
}

impl Category {
    fn named(name: &str) -> Self {
        Category {
            name: name.to_string(),
            keywords: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

/// The user's category → keyword dictionary. Iteration order is insertion
/// order, and it is also the order categories are matched in.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordStore {
    categories: Vec<Category>,
}

impl Default for KeywordStore {
    fn default() -> Self {
        KeywordStore {
            categories: vec![Category::named(UNCATEGORIZED)],
        }
    }
}

impl KeywordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    pub fn keywords_for(&self, name: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.keywords.as_slice())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Creates an empty keyword list under `name`. Returns whether the
    /// category was newly created.
    pub fn add_category(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.categories.push(Category::named(name));
        true
    }

    /// Appends `keyword` (trimmed, original casing kept) under `category`,
    /// creating the category if it does not exist. No-op when a keyword in
    /// the category already compares equal case-insensitively; returns
    /// whether an addition occurred.
    pub fn add_keyword(&mut self, category: &str, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return false;
        }
        let index = match self.categories.iter().position(|c| c.name == category) {
            Some(index) => index,
            None => {
                self.categories.push(Category::named(category));
                self.categories.len() - 1
            }
        };
        let entry = &mut self.categories[index];
        let lowered = normalize(keyword);
        if entry.keywords.iter().any(|existing| normalize(existing) == lowered) {
            return false;
        }
        entry.keywords.push(keyword.to_string());
        true
    }

    fn restore_uncategorized(&mut self) {
        if !self.contains(UNCATEGORIZED) {
            self.categories.insert(0, Category::named(UNCATEGORIZED));
        }
    }
}

// The persisted form is a plain JSON object, `{"<category>": ["<keyword>",
// ...]}`, written and read in store order. A derived map type would
// alphabetize categories and change which category wins a shared keyword.

impl Serialize for KeywordStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.keywords)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for KeywordStore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StoreVisitor;

        impl<'de> Visitor<'de> for StoreVisitor {
            type Value = KeywordStore;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category names to keyword lists")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut store = KeywordStore {
                    categories: Vec::with_capacity(access.size_hint().unwrap_or(0)),
                };
                while let Some((name, keywords)) = access.next_entry::<String, Vec<String>>()? {
                    // A hand-edited document may repeat a key; the last
                    // occurrence wins, matching a JSON round-trip.
                    match store.categories.iter().position(|c| c.name == name) {
                        Some(index) => store.categories[index].keywords = keywords,
                        None => store.categories.push(Category { name, keywords }),
                    }
                }
                store.restore_uncategorized();
                Ok(store)
            }
        }

        deserializer.deserialize_map(StoreVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(entries: &[(&str, &[&str])]) -> KeywordStore {
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
    fn default_store_has_only_uncategorized() {
        let store = KeywordStore::default();
        assert_eq!(store.category_names().collect::<Vec<_>>(), vec![UNCATEGORIZED]);
        assert_eq!(store.keywords_for(UNCATEGORIZED), Some(&[] as &[String]));
    }

    #[test]
    fn add_category_creates_once() {
        let mut store = KeywordStore::new();
        assert!(store.add_category("Groceries"));
        assert!(!store.add_category("Groceries"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn add_category_trims_and_rejects_empty() {
        let mut store = KeywordStore::new();
        assert!(store.add_category("  Groceries  "));
        assert!(store.contains("Groceries"));
        assert!(!store.add_category("   "));
    }

    #[test]
    fn add_keyword_is_idempotent() {
        let mut store = KeywordStore::new();
        assert!(store.add_keyword("Groceries", "Tesco"));
        let once = store.clone();
        assert!(!store.add_keyword("Groceries", "Tesco"));
        assert_eq!(store, once);
    }

    #[test]
    fn add_keyword_dedupes_case_insensitively() {
        let mut store = KeywordStore::new();
        assert!(store.add_keyword("Groceries", "Tesco"));
        assert!(!store.add_keyword("Groceries", "  tesco  "));
        assert!(!store.add_keyword("Groceries", "TESCO"));
        assert_eq!(store.keywords_for("Groceries").unwrap(), &["Tesco"]);
    }

    #[test]
    fn add_keyword_keeps_raw_casing_but_trims() {
        let mut store = KeywordStore::new();
        assert!(store.add_keyword("Subscriptions", "  Netflix UK  "));
        assert_eq!(store.keywords_for("Subscriptions").unwrap(), &["Netflix UK"]);
    }

    #[test]
    fn add_keyword_creates_missing_category() {
        let mut store = KeywordStore::new();
        assert!(store.add_keyword("Transport", "TFL Travel"));
        assert!(store.contains("Transport"));
    }

    #[test]
    fn add_keyword_rejects_blank() {
        let mut store = KeywordStore::new();
        assert!(!store.add_keyword("Groceries", "   "));
        assert!(!store.contains("Groceries"));
    }

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize("  Tesco Store 123  "), "tesco store 123");
    }

    // ── persisted form ────────────────────────────────────────────────────────

    #[test]
    fn serializes_to_a_json_object_in_store_order() {
        let store = store_with(&[("Groceries", &["Tesco"]), ("Transport", &["TFL Travel"])]);
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(
            json,
            r#"{"Uncategorized":[],"Groceries":["Tesco"],"Transport":["TFL Travel"]}"#
        );
    }

    #[test]
    fn round_trip_preserves_categories_and_keyword_order() {
        let store = store_with(&[
            ("Groceries", &["Tesco", "Aldi", "Lidl"]),
            ("Eating Out", &["Pret", "Nando's"]),
        ]);
        let json = serde_json::to_string(&store).unwrap();
        let restored: KeywordStore = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn deserialize_restores_missing_uncategorized() {
        let restored: KeywordStore = serde_json::from_str(r#"{"Groceries":["Tesco"]}"#).unwrap();
        assert_eq!(
            restored.category_names().collect::<Vec<_>>(),
            vec![UNCATEGORIZED, "Groceries"]
        );
    }

    #[test]
    fn deserialize_duplicate_key_last_occurrence_wins() {
        let restored: KeywordStore =
            serde_json::from_str(r#"{"Groceries":["Tesco"],"Groceries":["Aldi"]}"#).unwrap();
        assert_eq!(restored.keywords_for("Groceries").unwrap(), &["Aldi"]);
        assert_eq!(restored.len(), 2);
    }
}
