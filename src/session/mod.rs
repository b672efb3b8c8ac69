pub mod identity;
pub mod kv;
pub mod store;

pub use identity::IdentitySummary;
pub use kv::{FileKvStore, KvStore, MemoryKvStore};
pub use store::SessionStore;
