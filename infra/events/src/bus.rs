use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{trace, warn};

/// Buffer size of broadcast channels created implicitly by `publish`.
const DEFAULT_CAPACITY: usize = 64;

/// Channel semantics of a registered event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Fan-out stream of every published event.
    Broadcast { capacity: usize },
    /// Latest-value cell; late subscribers see the current value.
    Watch,
}

/// Anything `Send + Sync + 'static` can travel over the bus.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

#[derive(Debug)]
struct Slot {
    kind: ChannelKind,
    sender: Box<dyn Any + Send + Sync>,
}

impl Slot {
    fn broadcast<T: Event>(&self) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        match self.kind {
            ChannelKind::Broadcast { .. } => self
                .sender
                .downcast_ref::<broadcast::Sender<Arc<T>>>()
                .cloned()
                .ok_or_else(type_mismatch::<T>),
            ChannelKind::Watch => Err(kind_mismatch::<T>(self.kind, "broadcast")),
        }
    }

    fn watch<T: Event>(&self) -> Result<watch::Sender<Arc<T>>, EventBusError> {
        match self.kind {
            ChannelKind::Watch => self
                .sender
                .downcast_ref::<watch::Sender<Arc<T>>>()
                .cloned()
                .ok_or_else(type_mismatch::<T>),
            ChannelKind::Broadcast { .. } => Err(kind_mismatch::<T>(self.kind, "watch")),
        }
    }
}

/// Thread-safe, cloneable event bus keyed by the [`TypeId`] of each event.
///
/// Broadcast channels carry streams of events (navigation requests, toasts).
/// Watch channels hold the latest value of a piece of shared state and back
/// the store selectors.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    slots: Arc<RwLock<FxHashMap<TypeId, Slot>>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to the broadcast stream of `T`.
    ///
    /// # Examples
    /// ```rust
    /// use artis_event_bus::{EventBus, EventReceiverExt};
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Navigated(&'static str);
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> Result<(), artis_event_bus::EventBusError> {
    /// let bus = EventBus::new();
    /// let mut rx = bus.subscribe::<Navigated>()?;
    /// bus.publish(Navigated("/dashboard"))?;
    /// assert_eq!(rx.recv().await.unwrap().0, "/dashboard");
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        self.subscribe_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Subscribes to the broadcast stream of `T`, creating it with `capacity`
    /// when it does not exist yet.
    pub fn subscribe_with_capacity<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        if capacity == 0 {
            return Err(EventBusError::InvalidCapacity {
                message: "capacity must be >= 1".into(),
                context: Some(type_name::<T>().into()),
            });
        }
        Ok(self.broadcast_sender::<T>(capacity)?.subscribe())
    }

    /// Publishes `event` to every current broadcast subscriber.
    ///
    /// Returns the number of receivers reached; zero when nobody listens.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        let sender = self.broadcast_sender::<T>(DEFAULT_CAPACITY)?;
        let reached = sender.send(Arc::new(event)).unwrap_or_else(|_| {
            trace!(event = type_name::<T>(), "Event dropped: no active subscribers");
            0
        });
        if reached > 0 {
            trace!(event = type_name::<T>(), reached, "Event dispatched");
        }
        Ok(reached)
    }

    /// Subscribes to the latest value of `T`, seeding the cell with `initial`
    /// when it does not exist yet. The returned receiver treats the current
    /// value as already seen.
    pub fn subscribe_watch<T: Event>(
        &self,
        initial: T,
    ) -> Result<watch::Receiver<Arc<T>>, EventBusError> {
        Ok(self.watch_sender::<T>(|| Arc::new(initial))?.subscribe())
    }

    /// Replaces the latest value of `T`, notifying watch subscribers.
    pub fn publish_watch<T: Event>(&self, value: T) -> Result<(), EventBusError> {
        let value = Arc::new(value);
        let sender = self.watch_sender::<T>(|| value.clone())?;
        sender.send_replace(value);
        trace!(event = type_name::<T>(), "Watch value replaced");
        Ok(())
    }

    /// Current value of the watch cell for `T`, if one was ever created.
    pub fn latest<T: Event>(&self) -> Result<Option<Arc<T>>, EventBusError> {
        let slots = self.slots.read();
        slots
            .get(&TypeId::of::<T>())
            .map(|slot| slot.watch::<T>().map(|tx| tx.borrow().clone()))
            .transpose()
    }

    /// Drops every channel. Receivers observe closure on their next wait.
    ///
    /// Returns the number of channels closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut slots = self.slots.write();
        let count = slots.len();
        slots.clear();
        count
    }

    fn broadcast_sender<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        let id = TypeId::of::<T>();
        if let Some(slot) = self.slots.read().get(&id) {
            if let ChannelKind::Broadcast { capacity: existing } = slot.kind
                && existing != capacity
                && capacity != DEFAULT_CAPACITY
            {
                warn!(
                    event = type_name::<T>(),
                    existing,
                    requested = capacity,
                    "Broadcast channel already initialized with a different capacity"
                );
            }
            return slot.broadcast::<T>();
        }

        let mut slots = self.slots.write();
        let slot = slots.entry(id).or_insert_with(|| {
            trace!(event = type_name::<T>(), capacity, "Initializing broadcast channel");
            let (tx, _) = broadcast::channel::<Arc<T>>(capacity);
            Slot { kind: ChannelKind::Broadcast { capacity }, sender: Box::new(tx) }
        });
        slot.broadcast::<T>()
    }

    fn watch_sender<T: Event>(
        &self,
        initial: impl FnOnce() -> Arc<T>,
    ) -> Result<watch::Sender<Arc<T>>, EventBusError> {
        let id = TypeId::of::<T>();
        if let Some(slot) = self.slots.read().get(&id) {
            return slot.watch::<T>();
        }

        let mut slots = self.slots.write();
        let slot = slots.entry(id).or_insert_with(|| {
            trace!(event = type_name::<T>(), "Initializing watch channel");
            let (tx, _) = watch::channel::<Arc<T>>(initial());
            Slot { kind: ChannelKind::Watch, sender: Box::new(tx) }
        });
        slot.watch::<T>()
    }
}

fn type_mismatch<T>() -> EventBusError {
    EventBusError::TypeMismatch {
        message: type_name::<T>().into(),
        context: Some("Unexpected event type".into()),
    }
}

fn kind_mismatch<T>(found: ChannelKind, expected: &str) -> EventBusError {
    EventBusError::ChannelKindMismatch {
        message: format!("Expected {expected} but found {found:?} for {}", type_name::<T>()).into(),
        context: None,
    }
}
