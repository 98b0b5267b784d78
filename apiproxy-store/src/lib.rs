#![forbid(unsafe_code)]

pub mod memory;
pub mod store;

pub use crate::memory::MemoryStore;
pub use crate::store::{Entry, Store, StoreError};
