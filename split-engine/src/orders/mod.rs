//! Order Store and Persistence Adapter

pub mod book;
pub mod parties;
pub mod storage;

pub use book::{AddOutcome, OrderBook, OrderTarget};
pub use parties::PartyRepository;
pub use storage::{KvStorage, StorageError, StorageResult};
