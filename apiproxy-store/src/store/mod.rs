mod trait_store;
mod types;

pub use trait_store::Store;
pub use types::{Entry, StoreError};
