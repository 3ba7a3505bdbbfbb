//! Task store implementations.
//!
//! Available backends:
//! - `MemoryTaskStore` - In-memory storage (always available)
//! - `PostgresTaskStore` - PostgreSQL storage (requires `postgres` feature)

pub mod memory;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::MemoryTaskStore;

#[cfg(feature = "postgres")]
pub use postgres::PostgresTaskStore;
