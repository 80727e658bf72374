//! Tests for the discovery wire protocol

use super::*;
use crate::domain::{DiscoveryError, NodeId, PeerId};

fn make_peer(val: u8) -> PeerId {
    PeerId::new(format!("10.0.0.{}:3000", val), NodeId::new([val; 32]))
}

#[test]
fn test_opcode_values_are_canonical() {
    assert_eq!(u32::from(Opcode::Ping), 1);
    assert_eq!(u32::from(Opcode::Pong), 2);
    assert_eq!(u32::from(Opcode::LookupRequest), 3);
    assert_eq!(u32::from(Opcode::LookupResponse), 4);
}

#[test]
fn test_opcode_rejects_unknown_value() {
    assert_eq!(Opcode::try_from(3), Ok(Opcode::LookupRequest));
    assert_eq!(Opcode::try_from(0), Err(DiscoveryError::UnknownOpcode(0)));
    assert_eq!(Opcode::try_from(99), Err(DiscoveryError::UnknownOpcode(99)));
}

#[test]
fn test_empty_records_are_not_empty_payloads() {
    let payload = DiscoveryMessage::Pong.encode().unwrap();

    assert_eq!(payload, vec![WIRE_VERSION]);
    assert_eq!(DiscoveryMessage::decode(2, &payload), Ok(DiscoveryMessage::Pong));
}

#[test]
fn test_into_body_tags_service_and_opcode() {
    let body = DiscoveryMessage::Ping.into_body().unwrap();

    assert_eq!(body.service, DISCOVERY_SERVICE_ID);
    assert_eq!(body.opcode, 1);
    assert!(!body.payload.is_empty());
}

#[test]
fn test_lookup_response_preserves_order() {
    let response = LookupNodeResponse {
        peers: vec![make_peer(3), make_peer(1), make_peer(2)],
    };
    let payload = DiscoveryMessage::LookupResponse(response.clone())
        .encode()
        .unwrap();

    let decoded = DiscoveryMessage::decode(4, &payload).unwrap();

    let DiscoveryMessage::LookupResponse(decoded) = decoded else {
        panic!("expected LookupResponse, got {:?}", decoded);
    };
    let addresses: Vec<&str> = decoded.peers.iter().map(|p| p.address.as_str()).collect();
    assert_eq!(addresses, vec!["10.0.0.3:3000", "10.0.0.1:3000", "10.0.0.2:3000"]);
    assert_eq!(decoded, response);
}

#[test]
fn test_lookup_request_target_is_optional() {
    let with_target = DiscoveryMessage::LookupRequest(LookupNodeRequest {
        target: Some(make_peer(7)),
    });
    let without_target = DiscoveryMessage::LookupRequest(LookupNodeRequest::default());

    for message in [with_target, without_target] {
        let payload = message.encode().unwrap();
        assert_eq!(DiscoveryMessage::decode(3, &payload).unwrap(), message);
    }
}

#[test]
fn test_decode_rejects_short_identity() {
    let payload = {
        // Hand-build a response whose single peer carries a 4-byte identity
        let mut bytes = vec![WIRE_VERSION];
        bytes.extend_from_slice(&1u64.to_le_bytes()); // peers.len()
        bytes.extend_from_slice(&3u64.to_le_bytes()); // address.len()
        bytes.extend_from_slice(b"a:1");
        bytes.extend_from_slice(&4u64.to_le_bytes()); // id.len()
        bytes.extend_from_slice(&[1, 2, 3, 4]);
        bytes
    };

    let result = DiscoveryMessage::decode(4, &payload);

    assert!(matches!(result, Err(DiscoveryError::DecodeFailure(_))));
}

#[test]
fn test_decode_rejects_wrong_version() {
    let result = DiscoveryMessage::decode(1, &[WIRE_VERSION + 1]);

    assert!(matches!(result, Err(DiscoveryError::DecodeFailure(_))));
}

#[test]
fn test_decode_rejects_truncated_record() {
    let payload = DiscoveryMessage::LookupResponse(LookupNodeResponse {
        peers: vec![make_peer(1)],
    })
    .encode()
    .unwrap();

    let result = DiscoveryMessage::decode(4, &payload[..payload.len() - 5]);

    assert!(matches!(result, Err(DiscoveryError::DecodeFailure(_))));
}

#[test]
fn test_unknown_opcode_decodes_to_unknown() {
    let payload = DiscoveryMessage::Ping.encode().unwrap();

    assert_eq!(
        DiscoveryMessage::decode(42, &payload),
        Ok(DiscoveryMessage::Unknown(42))
    );
    assert_eq!(
        DiscoveryMessage::decode(42, &[0xFF, 0x00]),
        Ok(DiscoveryMessage::Unknown(42))
    );
}
