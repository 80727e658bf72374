use bincode::Options;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::message::MessageBody;
use super::opcode::Opcode;
use crate::domain::{DiscoveryError, NodeId, PeerId};

/// Payload record format version.
pub const WIRE_VERSION: u8 = 1;

/// Upper bound on a decoded payload, to cap allocation from hostile length prefixes.
pub const MAX_PAYLOAD_BYTES: u64 = 64 * 1024;

fn wire_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(MAX_PAYLOAD_BYTES)
}

#[derive(Serialize, Deserialize)]
struct Record<T> {
    version: u8,
    content: T,
}

/// Content of Ping and Pong records.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Empty {}

/// Peer as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePeer {
    pub address: String,
    pub id: Vec<u8>,
}

impl From<&PeerId> for WirePeer {
    fn from(peer: &PeerId) -> Self {
        Self {
            address: peer.address.clone(),
            id: peer.id.as_bytes().to_vec(),
        }
    }
}

impl TryFrom<WirePeer> for PeerId {
    type Error = DiscoveryError;

    fn try_from(wire: WirePeer) -> Result<Self, Self::Error> {
        let id = NodeId::from_slice(&wire.id).ok_or_else(|| {
            DiscoveryError::DecodeFailure(format!(
                "identity is {} bytes, expected 32",
                wire.id.len()
            ))
        })?;
        Ok(PeerId::new(wire.address, id))
    }
}

#[derive(Serialize, Deserialize)]
struct WireLookupRequest {
    target: Option<WirePeer>,
}

#[derive(Serialize, Deserialize)]
struct WireLookupResponse {
    peers: Vec<WirePeer>,
}

/// Request for the responder's nearest known peers.
///
/// Without a target the responder answers for the message's addressed
/// recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupNodeRequest {
    pub target: Option<PeerId>,
}

/// The responder's nearest known peers, nearest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupNodeResponse {
    pub peers: Vec<PeerId>,
}

/// A decoded discovery payload.
///
/// `Unknown` keeps the raw opcode of a message outside the canonical set, so
/// that dispatch can reject it by value. Its payload has no schema and is not
/// inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryMessage {
    Ping,
    Pong,
    LookupRequest(LookupNodeRequest),
    LookupResponse(LookupNodeResponse),
    Unknown(u32),
}

impl DiscoveryMessage {
    /// Decode a payload according to its opcode.
    pub fn decode(opcode: u32, payload: &[u8]) -> Result<Self, DiscoveryError> {
        let Ok(known) = Opcode::try_from(opcode) else {
            return Ok(Self::Unknown(opcode));
        };

        match known {
            Opcode::Ping => decode_record::<Empty>(payload).map(|_| Self::Ping),
            Opcode::Pong => decode_record::<Empty>(payload).map(|_| Self::Pong),
            Opcode::LookupRequest => {
                let wire: WireLookupRequest = decode_record(payload)?;
                let target = wire.target.map(PeerId::try_from).transpose()?;
                Ok(Self::LookupRequest(LookupNodeRequest { target }))
            }
            Opcode::LookupResponse => {
                let wire: WireLookupResponse = decode_record(payload)?;
                let peers = wire
                    .peers
                    .into_iter()
                    .map(PeerId::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::LookupResponse(LookupNodeResponse { peers }))
            }
        }
    }

    /// Raw opcode value for this message.
    pub fn opcode(&self) -> u32 {
        match self {
            Self::Ping => Opcode::Ping.as_u32(),
            Self::Pong => Opcode::Pong.as_u32(),
            Self::LookupRequest(_) => Opcode::LookupRequest.as_u32(),
            Self::LookupResponse(_) => Opcode::LookupResponse.as_u32(),
            Self::Unknown(opcode) => *opcode,
        }
    }

    /// Encode the payload record.
    pub fn encode(&self) -> Result<Vec<u8>, DiscoveryError> {
        match self {
            Self::Ping | Self::Pong | Self::Unknown(_) => encode_record(&Empty {}),
            Self::LookupRequest(request) => encode_record(&WireLookupRequest {
                target: request.target.as_ref().map(WirePeer::from),
            }),
            Self::LookupResponse(response) => encode_record(&WireLookupResponse {
                peers: response.peers.iter().map(WirePeer::from).collect(),
            }),
        }
    }

    /// Encode into a discovery-tagged body.
    pub fn into_body(self) -> Result<MessageBody, DiscoveryError> {
        let payload = self.encode()?;
        Ok(MessageBody::discovery(self.opcode(), payload))
    }
}

fn encode_record<T: Serialize>(content: &T) -> Result<Vec<u8>, DiscoveryError> {
    wire_options()
        .serialize(&Record {
            version: WIRE_VERSION,
            content,
        })
        .map_err(|e| DiscoveryError::SerializationFailure(e.to_string()))
}

fn decode_record<T: DeserializeOwned>(payload: &[u8]) -> Result<T, DiscoveryError> {
    let record: Record<T> = decode_bytes(payload)?;
    check_version(record.version)?;
    Ok(record.content)
}

fn decode_bytes<T: DeserializeOwned>(payload: &[u8]) -> Result<T, DiscoveryError> {
    wire_options()
        .deserialize(payload)
        .map_err(|e| DiscoveryError::DecodeFailure(e.to_string()))
}

fn check_version(version: u8) -> Result<(), DiscoveryError> {
    if version == WIRE_VERSION {
        Ok(())
    } else {
        Err(DiscoveryError::DecodeFailure(format!(
            "unsupported record version {}",
            version
        )))
    }
}
