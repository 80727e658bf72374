//! Kademlia distance calculations.

use crate::domain::{Distance, NodeId, NUM_BUCKETS};

/// Calculate the XOR distance between two NodeIds.
///
/// # Properties
/// - Symmetric: `xor_distance(a, b) == xor_distance(b, a)`
/// - Identity: `xor_distance(a, a) == Distance::zero()`
/// - Ordered as an unsigned 256-bit integer; smaller is closer
pub fn xor_distance(a: &NodeId, b: &NodeId) -> Distance {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut out = [0u8; 32];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = a_bytes[i] ^ b_bytes[i];
    }
    Distance::new(out)
}

/// Bucket index for a remote node relative to the local node.
///
/// Equals the index of the first differing bit, so bucket 0 holds the
/// farthest half of the id space and bucket 255 the single closest id.
/// Identical ids map to the last bucket; the routing table never stores
/// its own id so that slot is only reached by a neighbor differing in the
/// final bit.
#[inline]
pub fn bucket_for_peer(local: &NodeId, remote: &NodeId) -> usize {
    let local_bytes = local.as_bytes();
    let remote_bytes = remote.as_bytes();

    for i in 0..32 {
        let xor = local_bytes[i] ^ remote_bytes[i];
        if xor != 0 {
            return i * 8 + xor.leading_zeros() as usize;
        }
    }

    NUM_BUCKETS - 1
}
