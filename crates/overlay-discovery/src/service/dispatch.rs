use tracing::{debug, info};

use crate::domain::{DiscoveryError, PeerId};
use crate::ports::{RoutingTableStore, SendHandler};
use crate::protocol::{DiscoveryMessage, LookupNodeResponse, MessageBody};
use crate::service::{find_node, DiscoveryService};

impl<S: SendHandler, R: RoutingTableStore> DiscoveryService<S, R> {
    /// Opcode state machine for a validated, decoded message.
    ///
    /// `sender` and `target` are the routing-table identities the envelope
    /// addresses resolved to.
    ///
    /// The sender is refreshed before anything else, so even a disabled
    /// category keeps liveness information current.
    pub(crate) async fn dispatch(
        &self,
        sender: PeerId,
        target: PeerId,
        message: DiscoveryMessage,
    ) -> Result<Option<MessageBody>, DiscoveryError> {
        self.routes.upsert(sender.clone());

        match message {
            DiscoveryMessage::Ping => {
                if self.config.disable_ping {
                    return Ok(None);
                }
                DiscoveryMessage::Pong.into_body().map(Some)
            }
            DiscoveryMessage::Pong => {
                if self.config.disable_pong {
                    return Ok(None);
                }
                self.on_pong(&sender).await;
                Ok(None)
            }
            DiscoveryMessage::LookupRequest(request) => {
                if self.config.disable_lookup {
                    return Ok(None);
                }
                let target = request.target.unwrap_or(target);
                let peers = self.routes.find_closest_peers(&target.id, self.config.k);
                debug!(
                    sender = %sender,
                    target = %target,
                    returned = peers.len(),
                    "Answering lookup request"
                );
                DiscoveryMessage::LookupResponse(LookupNodeResponse { peers })
                    .into_body()
                    .map(Some)
            }
            // Unsolicited responses carry no obligation beyond the refresh
            DiscoveryMessage::LookupResponse(_) => Ok(None),
            DiscoveryMessage::Unknown(opcode) => Err(DiscoveryError::UnknownOpcode(opcode)),
        }
    }

    /// A peer answered our ping: search outward from it and absorb what we find.
    async fn on_pong(&self, sender: &PeerId) {
        let found = find_node(
            self.routes.as_ref(),
            self.send_handler.as_ref(),
            sender,
            self.config.k,
            self.config.alpha,
        )
        .await;

        for peer in found {
            self.routes.upsert(peer);
        }

        info!(
            address = %self.routes.self_id().address,
            peers = ?self.routes.peer_addresses(),
            "Routing table populated from peer"
        );
    }
}
