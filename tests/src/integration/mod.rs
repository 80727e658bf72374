//! # Integration Flows
//!
//! Several discovery nodes wired through `InMemoryNetwork`, exercising
//! bootstrap, iterative lookups and disconnect propagation end to end.

pub mod discovery_flows;
