pub mod json;

pub use json::{JsonFileRepository, MemoryRepository};
