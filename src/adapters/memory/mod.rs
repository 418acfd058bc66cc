//! In-memory record store and the demo dataset it is seeded with.

pub mod memory_repo;
pub mod seed;

pub use memory_repo::MemoryRepo;
