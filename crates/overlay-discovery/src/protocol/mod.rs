//! # Discovery Wire Protocol
//!
//! Canonical opcode values, the message envelope, and payload records.
//!
//! ## Wire Format
//!
//! | Field            | Value                                           |
//! |------------------|-------------------------------------------------|
//! | Service tag      | `DISCOVERY_SERVICE_ID` = 5                      |
//! | Ping             | opcode 1, record `{}`                           |
//! | Pong             | opcode 2, record `{}`                           |
//! | LookupRequest    | opcode 3, record `{ target: Option<WirePeer> }` |
//! | LookupResponse   | opcode 4, record `{ peers: Vec<WirePeer> }`     |
//!
//! Every payload is a bincode record `{ version: u8, content }` with
//! fixed-width integers, so even an empty record is one byte long.

mod codec;
mod message;
mod opcode;

pub use codec::{
    DiscoveryMessage, LookupNodeRequest, LookupNodeResponse, WirePeer, MAX_PAYLOAD_BYTES,
    WIRE_VERSION,
};
pub use message::{Message, MessageBody, DISCOVERY_SERVICE_ID};
pub use opcode::Opcode;

#[cfg(test)]
mod tests;
