use crate::bus::Event;
use crate::lifetime::Lifetime;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

/// Uniform receive API over bus receivers.
///
/// For `watch::Receiver`, `recv` waits for the next change and then yields
/// the latest value.
pub trait EventReceiverExt<T> {
    /// Next event, or `None` once the channel is closed.
    fn recv(&mut self) -> impl Future<Output = Option<Arc<T>>> + Send;

    /// Next event, or `None` once the channel is closed or `lifetime` ended.
    ///
    /// The lifetime is checked first, so nothing is yielded after the
    /// subscription was cancelled even when events are already queued.
    fn recv_until(&mut self, lifetime: &mut Lifetime) -> impl Future<Output = Option<Arc<T>>> + Send
    where
        Self: Send,
    {
        async move {
            if lifetime.is_ended() {
                return None;
            }
            tokio::select! {
                biased;
                () = lifetime.ended() => None,
                event = self.recv() => event,
            }
        }
    }
}

impl<T: Event> EventReceiverExt<T> for broadcast::Receiver<Arc<T>> {
    async fn recv(&mut self) -> Option<Arc<T>> {
        let mut skipped = 0u64;

        loop {
            match Self::recv(self).await {
                Ok(event) => {
                    if skipped > 0 {
                        warn!(
                            event = std::any::type_name::<T>(),
                            skipped, "Receiver lagged; continuing from the oldest retained event"
                        );
                    }
                    return Some(event);
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    skipped = skipped.saturating_add(n);
                    debug!(event = std::any::type_name::<T>(), skipped = n, "Receiver lagged");
                },
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl<T: Event> EventReceiverExt<T> for watch::Receiver<Arc<T>> {
    async fn recv(&mut self) -> Option<Arc<T>> {
        match self.changed().await {
            Ok(()) => Some(self.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}
