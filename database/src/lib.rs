pub mod mention_cache;
pub mod sqlite;
pub mod store;

#[cfg(test)]
mod tests;

pub use mention_cache::MentionCache;
pub use sqlite::SqliteStore;
pub use store::{KeyValueStore, MemoryStore};
