use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use derive_builder::Builder;
use rumqttc::{
    AsyncClient, Event, EventLoop, MqttOptions, Outgoing, Packet, Publish, QoS,
    SubscribeReasonCode,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::fade::{Clock, FadeController};
use crate::protocol::error::GatewayError;
use crate::protocol::gateway::Publisher;
use crate::protocol::payload::Route;
use crate::protocol::router::Router;

const REQUEST_CHANNEL_CAPACITY: usize = 64;
const DISCONNECT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Builder, Debug, Clone)]
#[builder(setter(into))]
pub struct BrokerOptions {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    #[builder(default = "Duration::from_secs(5)")]
    pub keep_alive: Duration,
    #[builder(default = "QoS::AtMostOnce")]
    pub qos: QoS,
}

impl BrokerOptions {
    pub fn builder() -> BrokerOptionsBuilder {
        BrokerOptionsBuilder::default()
    }
}

/// Publishing side of the broker connection. Cheap to clone.
#[derive(Clone)]
pub struct MqttPublisher {
    client: AsyncClient,
    qos: QoS,
}

#[async_trait]
impl Publisher for MqttPublisher {
    async fn publish(&self, topic: &str, payload: String) -> Result<(), GatewayError> {
        self.client
            .publish(topic, self.qos, false, payload)
            .await
            .map_err(|e| GatewayError::Publish(format!("{topic}: {e}")))
    }
}

/// Connection to the broker: subscriptions, the inbound dispatch loop and shutdown.
pub struct MqttSession {
    client: AsyncClient,
    eventloop: Option<EventLoop>,
    router: Router,
    qos: QoS,
    pump: Option<JoinHandle<()>>,
}

impl MqttSession {
    /// Opens the connection and waits for the broker to acknowledge it.
    pub async fn connect(options: BrokerOptions) -> Result<Self, GatewayError> {
        let mut mqttoptions =
            MqttOptions::new(options.client_id.clone(), options.host.clone(), options.port);
        mqttoptions.set_keep_alive(options.keep_alive);

        let (client, mut eventloop) = AsyncClient::new(mqttoptions, REQUEST_CHANNEL_CAPACITY);
        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                    info!(
                        "Connected to MQTT broker at {}:{} as {} ({:?})",
                        options.host, options.port, options.client_id, ack.code
                    );
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    return Err(GatewayError::Connection(format!(
                        "{}:{}: {e}",
                        options.host, options.port
                    )));
                }
            }
        }

        Ok(Self {
            client,
            eventloop: Some(eventloop),
            router: Router::default(),
            qos: options.qos,
            pump: None,
        })
    }

    pub fn publisher(&self) -> MqttPublisher {
        MqttPublisher {
            client: self.client.clone(),
            qos: self.qos,
        }
    }

    /// Subscribes to `topic` and routes its messages to the given handler.
    pub async fn subscribe(&mut self, topic: &str, route: Route) -> Result<(), GatewayError> {
        self.client
            .subscribe(topic, self.qos)
            .await
            .map_err(|e| GatewayError::Subscribe(format!("{topic}: {e}")))?;
        self.router.insert(topic, route);
        info!("Subscribed to topic: {topic} ({route:?})");
        Ok(())
    }

    /// Feeds inbound messages to `controller` one at a time until `shutdown` resolves.
    ///
    /// The rumqttc event loop is polled on a separate task so that the controller's own
    /// publishes keep flowing while a fade is running.
    pub async fn run<P, C, F>(
        &mut self,
        controller: &mut FadeController<P, C>,
        shutdown: F,
    ) -> Result<(), GatewayError>
    where
        P: Publisher,
        C: Clock,
        F: Future<Output = ()>,
    {
        let eventloop = self
            .eventloop
            .take()
            .ok_or_else(|| GatewayError::Connection("Event loop already running".to_string()))?;
        let (sender, mut receiver) = mpsc::unbounded_channel();
        self.pump = Some(tokio::spawn(pump_eventloop(eventloop, sender)));

        dispatch_inbound(&mut receiver, &self.router, controller, shutdown).await
    }

    pub async fn disconnect(mut self) -> Result<(), GatewayError> {
        self.client
            .disconnect()
            .await
            .map_err(|e| GatewayError::Disconnect(e.to_string()))?;
        if let Some(mut pump) = self.pump.take()
            && tokio::time::timeout(DISCONNECT_TIMEOUT, &mut pump)
                .await
                .is_err()
        {
            warn!("Event loop did not stop in time, aborting it");
            pump.abort();
        }
        info!("Disconnected from MQTT broker");
        Ok(())
    }
}

/// Hands each routed message to `controller`, awaiting the handler before taking the
/// next one. Errors forwarded by the event loop pump end the loop.
async fn dispatch_inbound<P, C, F>(
    receiver: &mut UnboundedReceiver<Result<Publish, GatewayError>>,
    router: &Router,
    controller: &mut FadeController<P, C>,
    shutdown: F,
) -> Result<(), GatewayError>
where
    P: Publisher,
    C: Clock,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested, leaving dispatch loop");
                break Ok(());
            }
            message = receiver.recv() => match message {
                Some(Ok(publish)) => {
                    if let Some(command) = router.command(&publish) {
                        controller.handle(command).await?;
                    }
                }
                Some(Err(e)) => break Err(e),
                None => {
                    info!("Inbound message stream ended");
                    break Ok(());
                }
            },
        }
    }
}

async fn pump_eventloop(
    mut eventloop: EventLoop,
    sender: UnboundedSender<Result<Publish, GatewayError>>,
) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                if sender.send(Ok(publish)).is_err() {
                    break;
                }
            }
            Ok(Event::Incoming(Packet::SubAck(ack))) => {
                if ack
                    .return_codes
                    .iter()
                    .any(|code| matches!(code, SubscribeReasonCode::Failure))
                {
                    let _ = sender.send(Err(GatewayError::Subscribe(format!(
                        "Broker rejected subscription {}",
                        ack.pkid
                    ))));
                    break;
                }
                debug!("Subscription {} acknowledged", ack.pkid);
            }
            Ok(Event::Outgoing(Outgoing::Disconnect)) => break,
            Ok(_) => {}
            Err(e) => {
                error!("Connection error: {:?}", e);
                let _ = sender.send(Err(GatewayError::Connection(e.to_string())));
                break;
            }
        }
    }
    info!("Event loop terminated");
}
