use tracing::{info, warn};

use crate::domain::PeerId;
use crate::ports::{DiscoveryApi, RoutingTableStore, SendHandler};
use crate::protocol::{DiscoveryMessage, Message, Opcode};
use crate::service::DiscoveryService;

impl<S, R> DiscoveryService<S, R>
where
    S: SendHandler + 'static,
    R: RoutingTableStore + 'static,
{
    /// Ping each seed and feed its reply back through `receive_message`.
    ///
    /// A seed that answers with a pong triggers the usual pong handling, so
    /// a successful bootstrap leaves the table populated with the seed's
    /// neighbourhood. Seeds that fail are logged and skipped.
    ///
    /// # Returns
    ///
    /// The number of seeds whose reply was accepted.
    pub async fn bootstrap(&self, seeds: &[PeerId]) -> usize {
        let local = self.routes.self_id();
        let ping = match DiscoveryMessage::Ping.encode() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to encode ping");
                return 0;
            }
        };

        let mut accepted = 0;
        for seed in seeds.iter().filter(|seed| **seed != local) {
            // The reply comes back from an address we may not have met yet
            let announced =
                self.routes.lookup_remote_address(&seed.address).as_ref() == Some(seed);
            if !announced {
                self.routes.register_address(seed.clone());
            }

            let reply = match self
                .send_handler
                .request(seed, Opcode::Ping, ping.clone())
                .await
            {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(seed = %seed, error = %e, "Bootstrap peer unreachable");
                    self.forget_seed(seed, announced);
                    continue;
                }
            };

            let message = Message::new(seed.clone(), local.clone(), reply);
            match self.receive_message(&message).await {
                Ok(_) => accepted += 1,
                Err(e) => {
                    warn!(seed = %seed, error = %e, "Bootstrap reply rejected");
                    self.forget_seed(seed, announced);
                }
            }
        }

        info!(
            address = %local.address,
            seeds = seeds.len(),
            accepted,
            known_peers = self.routes.peer_count(),
            "Bootstrap complete"
        );
        accepted
    }

    /// Undo the address registration of a failed seed we had never met.
    fn forget_seed(&self, seed: &PeerId, announced: bool) {
        if !announced && !self.routes.peer_exists(seed) {
            self.routes.remove_peer(seed);
        }
    }
}
