use crate::domain::PeerId;

/// Service tag carried on every discovery `MessageBody`.
///
/// Lets the discovery protocol share a transport with other services.
pub const DISCOVERY_SERVICE_ID: u32 = 5;

/// Service-tagged message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody {
    /// Service multiplexing tag
    pub service: u32,
    /// Raw opcode; validated during decoding
    pub opcode: u32,
    /// Encoded payload record
    pub payload: Vec<u8>,
}

impl MessageBody {
    /// A body tagged for the discovery service.
    pub fn discovery(opcode: u32, payload: Vec<u8>) -> Self {
        Self {
            service: DISCOVERY_SERVICE_ID,
            opcode,
            payload,
        }
    }
}

/// Envelope delivered by the transport.
///
/// Only the addresses of `sender` and `recipient` are trusted; the
/// identities are re-resolved through the routing table on receipt.
#[derive(Debug, Clone)]
pub struct Message {
    pub sender: PeerId,
    pub recipient: PeerId,
    pub body: Option<MessageBody>,
}

impl Message {
    pub fn new(sender: PeerId, recipient: PeerId, body: MessageBody) -> Self {
        Self {
            sender,
            recipient,
            body: Some(body),
        }
    }
}
