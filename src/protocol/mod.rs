pub mod error;
pub mod gateway;
pub mod mqtt;
pub mod payload;
pub mod router;

pub use error::{ConfigError, GatewayError};
pub use gateway::Publisher;
pub use mqtt::{BrokerOptions, MqttPublisher, MqttSession};
pub use payload::{InboundCommand, Route};
pub use router::Router;
