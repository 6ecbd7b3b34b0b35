use crate::protocol::error::ConfigError;

/// Incoming command topic and the real command topic it is proxied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPair {
    incoming: String,
    outgoing: String,
}

impl TopicPair {
    pub fn new(
        name: &str,
        incoming: impl Into<String>,
        outgoing: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let incoming = incoming.into();
        let outgoing = outgoing.into();
        if incoming.trim().is_empty() {
            return Err(ConfigError::EmptyTopic(format!("{name} incoming")));
        }
        if outgoing.trim().is_empty() {
            return Err(ConfigError::EmptyTopic(format!("{name} outgoing")));
        }
        if incoming == outgoing {
            return Err(ConfigError::LoopingTopic(incoming));
        }
        Ok(Self { incoming, outgoing })
    }

    pub fn incoming(&self) -> &str {
        &self.incoming
    }

    pub fn outgoing(&self) -> &str {
        &self.outgoing
    }
}

/// Every topic a single proxied light uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTopics {
    pub power: TopicPair,
    pub brightness: TopicPair,
    /// Receives the target brightness of every fade, for UI sliders.
    pub brightness_stat: String,
}

impl ProxyTopics {
    pub fn new(
        power: TopicPair,
        brightness: TopicPair,
        brightness_stat: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let brightness_stat = brightness_stat.into();
        if brightness_stat.trim().is_empty() {
            return Err(ConfigError::EmptyTopic("brightness statistic".to_string()));
        }

        // Publishing to a topic we also listen on would feed our own output back in.
        let outgoing = [power.outgoing(), brightness.outgoing(), brightness_stat.as_str()];
        for incoming in [power.incoming(), brightness.incoming()] {
            if outgoing.contains(&incoming) {
                return Err(ConfigError::LoopingTopic(incoming.to_string()));
            }
        }

        Ok(Self {
            power,
            brightness,
            brightness_stat,
        })
    }
}
