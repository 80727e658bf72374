use async_trait::async_trait;
use tracing::debug;

use crate::domain::{DiscoveryError, PeerId};
use crate::ports::{DiscoveryApi, RoutingTableStore, SendHandler};
use crate::protocol::{DiscoveryMessage, Message, MessageBody, DISCOVERY_SERVICE_ID};
use crate::service::DiscoveryService;

#[async_trait]
impl<S, R> DiscoveryApi for DiscoveryService<S, R>
where
    S: SendHandler + 'static,
    R: RoutingTableStore + 'static,
{
    async fn receive_message(
        &self,
        message: &Message,
    ) -> Result<Option<MessageBody>, DiscoveryError> {
        let body = match &message.body {
            Some(body) if body.service == DISCOVERY_SERVICE_ID => body,
            _ => return Err(DiscoveryError::CorruptMessage),
        };
        if body.payload.is_empty() {
            return Err(DiscoveryError::MissingPayload);
        }

        let sender = self
            .routes
            .lookup_remote_address(&message.sender.address)
            .ok_or_else(|| DiscoveryError::UnresolvedSender(message.sender.address.clone()))?;
        // An unknown recipient is rejected even for first-contact traffic
        let target = self
            .routes
            .lookup_remote_address(&message.recipient.address)
            .ok_or_else(|| {
                DiscoveryError::UnresolvedRecipient(message.recipient.address.clone())
            })?;

        let decoded = DiscoveryMessage::decode(body.opcode, &body.payload)?;

        self.dispatch(sender, target, decoded).await
    }

    fn peer_connect(&self, peer: PeerId) {
        self.routes.register_address(peer);
    }

    fn peer_disconnect(&self, peer: &PeerId) {
        if self.routes.remove_peer(peer) {
            debug!(
                address = %self.routes.self_id().address,
                peer_address = %peer.address,
                "Peer has disconnected"
            );
        }
    }
}
