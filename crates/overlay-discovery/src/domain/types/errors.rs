//! Domain Errors for Peer Discovery
//!
//! Every error is scoped to a single message or request. Envelope and
//! payload validation failures are raised before the routing table is
//! touched; only `UnknownOpcode` follows the sender refresh.

use thiserror::Error;

/// Errors raised while handling an inbound discovery message.
///
/// The transport layer decides whether to drop, log or penalize the
/// remote peer; the service itself never retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    /// Body missing or addressed to another service
    #[error("Message is corrupt")]
    CorruptMessage,

    #[error("Message body is missing")]
    MissingPayload,

    /// Sender address is not in the routing table's address directory
    #[error("Unable to lookup sender: {0}")]
    UnresolvedSender(String),

    /// Recipient address is not in the routing table's address directory
    #[error("Unable to lookup recipient: {0}")]
    UnresolvedRecipient(String),

    #[error("Unable to parse message: {0}")]
    DecodeFailure(String),

    #[error("Unknown message opcode type: {0}")]
    UnknownOpcode(u32),

    /// Building a reply payload failed
    #[error("Unable to marshal: {0}")]
    SerializationFailure(String),
}

/// Errors from the transport collaborator.
///
/// Timeouts and retries are the transport's business; the lookup engine
/// treats every variant as "this peer contributed nothing".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("peer unreachable: {0}")]
    Unreachable(String),

    #[error("request timed out")]
    Timeout,

    /// Remote handled the request but had nothing to send back
    #[error("peer sent no reply")]
    NoReply,

    /// Remote refused the request
    #[error("request rejected: {0}")]
    Rejected(String),
}
