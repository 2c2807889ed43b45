//! StockSync Storage Crate
//!
//! Persists feed sections and summaries. The feed is one JSON document;
//! writers merge objects into paths and never replace the whole tree.

pub mod errors;
pub mod feed;
pub mod firebase;
pub mod memory;
pub mod paths;
pub mod store;

pub use errors::StorageError;
pub use feed::{save_section, save_summary};
pub use firebase::FirebaseStore;
pub use memory::MemoryStore;
pub use store::FeedStore;
