pub mod keywords;
pub mod money;
pub mod repository;
pub mod summary;
pub mod transaction;

pub use keywords::{normalize, Category, KeywordStore, UNCATEGORIZED};
pub use money::Money;
pub use repository::{KeywordRepository, StoreError};
pub use summary::{summarize, total};
pub use transaction::{FlowDirection, Transaction};
