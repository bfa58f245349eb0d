//! Document index implementations

mod memory;

pub use memory::{InMemoryVectorIndex, IndexConfig};
