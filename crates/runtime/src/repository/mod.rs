//! Persistence for characters, battles, catalogue and inventory.
//!
//! Each table is exposed through its own repository trait and bundled by
//! [`Store`]. Two stores ship with the crate:
//! - [`InMemoryStore`] for tests and embedding
//! - [`FileStore`], an in-memory store snapshotted to a JSON file on flush

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use traits::{
    BattleRepository, CharacterRepository, InventoryRepository, ItemRepository,
    MonsterRepository, Store,
};
