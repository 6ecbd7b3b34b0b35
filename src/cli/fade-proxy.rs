use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use light_fade_proxy::logging::setup_logging;
use light_fade_proxy::settings::{Settings, parse_qos};
use light_fade_proxy::{BrokerOptions, ProxyTopics, TopicPair, start_proxy};
use tracing::info;

/// Proxies light power and brightness commands, turning them into brightness fades.
#[derive(Parser, Debug)]
#[clap(name = "light-fade-proxy")]
struct Params {
    /// Hostname or IP address of the MQTT broker
    #[clap(long, env = "MQTT_BROKER_HOSTNAME")]
    host: String,
    /// Port of the MQTT broker
    #[clap(long, env = "MQTT_BROKER_PORT")]
    port: u16,
    /// Client identifier used when connecting to the broker
    #[clap(long, env = "MQTT_CLIENT_ID")]
    client_id: String,
    /// Keep-alive interval in seconds
    #[clap(long, env = "MQTT_KEEP_ALIVE_SECS", default_value = "5", value_parser = clap::value_parser!(u64).range(1..))]
    keep_alive: u64,
    /// QoS level for subscriptions and publishes (0, 1 or 2)
    #[clap(long, env = "MQTT_QOS", default_value = "0")]
    qos: u8,
    /// Topic power commands are received on
    #[clap(long, env = "POWER_COMMAND_TOPIC_PROXY")]
    power_incoming: String,
    /// Topic power commands are forwarded to
    #[clap(long, env = "POWER_COMMAND_TOPIC_ORIGINAL")]
    power_outgoing: String,
    /// Topic brightness commands are received on
    #[clap(long, env = "BRIGHTNESS_COMMAND_TOPIC_PROXY")]
    brightness_incoming: String,
    /// Topic brightness steps are published to
    #[clap(long, env = "BRIGHTNESS_COMMAND_TOPIC_ORIGINAL")]
    brightness_outgoing: String,
    /// Topic the target brightness of each fade is published to
    #[clap(long, env = "BRIGHTNESS_STATISTIC_TOPIC")]
    brightness_stat: String,
    /// JSON file with fade settings (if not set, default settings are used)
    #[clap(long, env = "FADE_SETTINGS")]
    settings: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let params = Params::parse();

    setup_logging();

    let settings =
        Settings::load(params.settings.as_deref()).context("Failed to load fade settings")?;

    let topics = ProxyTopics::new(
        TopicPair::new("power", params.power_incoming, params.power_outgoing)?,
        TopicPair::new(
            "brightness",
            params.brightness_incoming,
            params.brightness_outgoing,
        )?,
        params.brightness_stat,
    )
    .context("Invalid topic configuration")?;

    let options = BrokerOptions::builder()
        .host(params.host)
        .port(params.port)
        .client_id(params.client_id)
        .keep_alive(Duration::from_secs(params.keep_alive))
        .qos(parse_qos(params.qos)?)
        .build()
        .context("Invalid broker configuration")?;

    start_proxy(options, topics, settings)
        .await
        .context("Light fade proxy stopped with an error")?;

    info!("Light fade proxy stopped");
    Ok(())
}
