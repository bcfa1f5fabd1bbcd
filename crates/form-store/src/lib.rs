#![allow(missing_docs)]

pub mod file;
pub mod memory;
pub mod paging;
pub mod store;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use paging::{Page, paginate};
pub use store::{FormStore, StoreError};
