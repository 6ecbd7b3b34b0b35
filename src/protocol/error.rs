use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Broker connection failed: {0}")]
    Connection(String),
    #[error("Subscribing failed: {0}")]
    Subscribe(String),
    #[error("Publishing failed: {0}")]
    Publish(String),
    #[error("Disconnecting failed: {0}")]
    Disconnect(String),
    #[error("Invalid payload: {0}")]
    Payload(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Topic {0} must not be empty")]
    EmptyTopic(String),
    #[error("Topic {0} is used both as incoming and outgoing topic")]
    LoopingTopic(String),
    #[error("Invalid QoS level {0}, expected 0, 1 or 2")]
    InvalidQos(u8),
    #[error("Invalid settings file: {0}")]
    InvalidSettings(String),
}
