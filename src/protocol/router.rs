use std::collections::HashMap;

use rumqttc::Publish;
use tracing::{debug, warn};

use crate::protocol::payload::{InboundCommand, Route};

/// Maps subscribed topics to handlers and decodes what arrives on them.
#[derive(Debug, Default)]
pub struct Router {
    routes: HashMap<String, Route>,
}

impl Router {
    pub fn insert(&mut self, topic: &str, route: Route) {
        self.routes.insert(topic.to_string(), route);
    }

    /// Command carried by `publish`, or `None` when the topic is not routed or the
    /// payload does not decode. Dropped messages are logged here.
    pub fn command(&self, publish: &Publish) -> Option<InboundCommand> {
        let Some(route) = self.routes.get(&publish.topic).copied() else {
            debug!("Ignoring message on unrouted topic {}", publish.topic);
            return None;
        };
        match InboundCommand::decode(route, &publish.payload) {
            Ok(command) => Some(command),
            Err(e) => {
                warn!("Dropping message on {}: {e}", publish.topic);
                None
            }
        }
    }
}
