//! In-memory repository implementations for tests and embedding.

mod store;
mod table;

pub use store::InMemoryStore;
pub use table::Table;
