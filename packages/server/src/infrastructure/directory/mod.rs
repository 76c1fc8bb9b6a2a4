//! Stream directory implementations.

mod inmemory;

pub use inmemory::InMemoryStreamDirectory;
