//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! - **InMemorySessionStore** - process-memory session table

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
