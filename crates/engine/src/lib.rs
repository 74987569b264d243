pub mod csv;
pub mod learn;
pub mod matcher;

pub use csv::{parse_statement, parse_statement_path, ParseError};
pub use learn::{create_category, learn_correction};
pub use matcher::{categorize, KeywordMatcher};

/// Facade for presentation layers: everything the UI needs in one place.
pub mod engine {
    use std::io::Read;

    use pigeonhole_core::{KeywordStore, Transaction};

    pub use crate::csv::{parse_statement, parse_statement_path, ParseError};
    pub use crate::learn::{create_category, learn_correction};
    pub use crate::matcher::categorize;
    pub use pigeonhole_core::{summarize, total};

    /// Parses a statement export and labels it against the store in one
    /// step.
    pub fn categorize_statement<R: Read>(
        data: R,
        store: &KeywordStore,
    ) -> Result<Vec<Transaction>, ParseError> {
        Ok(categorize(parse_statement(data)?, store))
    }
}
