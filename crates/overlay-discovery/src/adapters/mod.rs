//! # Reference Adapters
//!
//! Concrete implementations of the driven ports:
//!
//! - `routing`: `SharedRoutingTable`, the lock-guarded `RoutingTableStore`
//! - `memory`: `InMemoryNetwork` and `MemoryTransport`, an in-process transport
//! - `config`: `StaticConfigProvider`, plus `TomlConfigProvider` with the
//!   `config-file` feature

pub mod config;
pub mod memory;
pub mod routing;

pub use config::*;
pub use memory::*;
pub use routing::*;
