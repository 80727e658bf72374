//! # Driving Ports (Inbound API)
//!
//! The entry points the transport layer drives.

use async_trait::async_trait;

use crate::domain::{DiscoveryError, PeerId};
use crate::protocol::{Message, MessageBody};

/// Primary API the transport uses to hand discovery traffic to a node.
///
/// # Example
///
/// ```rust,ignore
/// use overlay_discovery::ports::DiscoveryApi;
///
/// async fn on_frame<T: DiscoveryApi>(node: &T, message: Message) {
///     match node.receive_message(&message).await {
///         Ok(Some(reply)) => transport.reply(&message.sender, reply).await,
///         Ok(None) => {}
///         Err(e) => tracing::debug!(error = %e, "dropping discovery message"),
///     }
/// }
/// ```
#[async_trait]
pub trait DiscoveryApi: Send + Sync {
    /// Validate, decode and dispatch one inbound message.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(body))` if the message warrants a reply
    /// - `Ok(None)` if it was handled (or its category is disabled) and
    ///   nothing needs to go back
    /// - `Err(_)` if the message was rejected; no reply is produced
    ///
    /// # Errors
    ///
    /// `CorruptMessage`, `MissingPayload`, `UnresolvedSender`,
    /// `UnresolvedRecipient`, `DecodeFailure`, `UnknownOpcode`,
    /// `SerializationFailure`.
    async fn receive_message(&self, message: &Message)
        -> Result<Option<MessageBody>, DiscoveryError>;

    /// The transport finished a handshake with `peer`.
    ///
    /// Makes the peer's address resolvable; it does not make the peer a
    /// routing table member.
    fn peer_connect(&self, peer: PeerId);

    /// The transport lost its connection to `peer`.
    ///
    /// Removes the peer if it is known. Never fails.
    fn peer_disconnect(&self, peer: &PeerId);
}
