use async_trait::async_trait;

use crate::protocol::error::GatewayError;

/// Outbound half of the broker connection, the only part the fade logic needs.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, topic: &str, payload: String) -> Result<(), GatewayError>;
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::RwLock;

    /// Records every publish instead of sending it.
    #[derive(Clone, Default)]
    pub struct FakePublisher {
        pub published: Arc<RwLock<Vec<(String, String)>>>,
        pub should_fail: Arc<AtomicBool>,
        /// Number of publishes accepted before `should_fail` kicks in.
        pub fail_after: Arc<AtomicUsize>,
    }

    impl FakePublisher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_after(successes: usize) -> Self {
            Self {
                should_fail: Arc::new(AtomicBool::new(true)),
                fail_after: Arc::new(AtomicUsize::new(successes)),
                ..Default::default()
            }
        }

        pub async fn take(&self) -> Vec<(String, String)> {
            std::mem::take(&mut *self.published.write().await)
        }
    }

    #[async_trait]
    impl Publisher for FakePublisher {
        async fn publish(&self, topic: &str, payload: String) -> Result<(), GatewayError> {
            let mut published = self.published.write().await;
            if self.should_fail.load(Ordering::Relaxed)
                && published.len() >= self.fail_after.load(Ordering::Relaxed)
            {
                return Err(GatewayError::Publish("Fake error".to_string()));
            }
            published.push((topic.to_string(), payload));
            Ok(())
        }
    }
}
