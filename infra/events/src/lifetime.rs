use std::sync::Arc;
use tokio::sync::watch;

/// Owner side of a subscription lifetime.
///
/// Views create one per activation and call [`Unsubscriber::unsubscribe`] on
/// teardown; every task holding a [`Lifetime`] from it then stops acting on
/// further events. Dropping the last `Unsubscriber` ends the lifetime too.
#[derive(Debug, Clone)]
pub struct Unsubscriber {
    signal: Arc<watch::Sender<bool>>,
}

impl Default for Unsubscriber {
    fn default() -> Self {
        let (signal, _) = watch::channel(false);
        Self { signal: Arc::new(signal) }
    }
}

impl Unsubscriber {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends the lifetime. Idempotent.
    pub fn unsubscribe(&self) {
        self.signal.send_replace(true);
    }

    #[must_use]
    pub fn is_unsubscribed(&self) -> bool {
        *self.signal.borrow()
    }

    /// A watcher of this lifetime, handed to subscription tasks.
    #[must_use]
    pub fn lifetime(&self) -> Lifetime {
        Lifetime { signal: self.signal.subscribe() }
    }
}

/// Subscriber side of a subscription lifetime.
#[derive(Debug, Clone)]
pub struct Lifetime {
    signal: watch::Receiver<bool>,
}

impl Lifetime {
    #[must_use]
    pub fn is_ended(&self) -> bool {
        *self.signal.borrow() || self.signal.has_changed().is_err()
    }

    /// Resolves once the owner unsubscribed or was dropped.
    pub async fn ended(&mut self) {
        let _ = self.signal.wait_for(|ended| *ended).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsubscribe_ends_every_lifetime() {
        let owner = Unsubscriber::new();
        let mut first = owner.lifetime();
        let second = owner.lifetime();
        assert!(!first.is_ended());

        owner.unsubscribe();
        first.ended().await;
        assert!(second.is_ended());
        assert!(owner.is_unsubscribed());
    }

    #[tokio::test]
    async fn test_dropping_owner_ends_lifetime() {
        let owner = Unsubscriber::new();
        let mut lifetime = owner.lifetime();
        drop(owner);
        lifetime.ended().await;
        assert!(lifetime.is_ended());
    }
}
