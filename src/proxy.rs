use tokio::signal;
use tracing::{error, info};

use crate::fade::{FadeController, ProxyTopics};
use crate::protocol::{BrokerOptions, GatewayError, MqttSession, Route};
use crate::settings::Settings;

/// Connects, subscribes both incoming topics and proxies commands until shutdown.
///
/// Transport errors end the proxy; nothing is retried here.
pub async fn start_proxy(
    options: BrokerOptions,
    topics: ProxyTopics,
    settings: Settings,
) -> Result<(), GatewayError> {
    let mut session = MqttSession::connect(options).await?;
    session
        .subscribe(topics.power.incoming(), Route::Power)
        .await?;
    session
        .subscribe(topics.brightness.incoming(), Route::Brightness)
        .await?;

    info!(
        "Proxying {} -> {} and {} -> {} (debounce {}ms)",
        topics.power.incoming(),
        topics.power.outgoing(),
        topics.brightness.incoming(),
        topics.brightness.outgoing(),
        settings.debounce_ms
    );
    let mut controller = FadeController::new(session.publisher(), topics, settings);

    session.run(&mut controller, shutdown_signal()).await?;
    session.disconnect().await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("signal received, starting graceful shutdown");
}
