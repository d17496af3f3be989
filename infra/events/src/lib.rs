//! # Event Bus
//!
//! Typed publish/subscribe plumbing for the Artis shell.
//!
//! Events are identified by their Rust type. Two channel kinds exist:
//! broadcast (every subscriber sees every event) and watch (subscribers see
//! the latest value). Subscriptions are cancelled cooperatively through an
//! [`Unsubscriber`] / [`Lifetime`] pair.
//!
//! # Example
//!
//! ```rust
//! use artis_event_bus::{EventBus, EventReceiverExt, Unsubscriber};
//!
//! #[derive(Debug)]
//! struct AuthError(Option<String>);
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), artis_event_bus::EventBusError> {
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe_watch(AuthError(None))?;
//! let owner = Unsubscriber::new();
//! let mut lifetime = owner.lifetime();
//!
//! bus.publish_watch(AuthError(Some("taken".into())))?;
//! let seen = rx.recv_until(&mut lifetime).await.unwrap();
//! assert_eq!(seen.0.as_deref(), Some("taken"));
//!
//! owner.unsubscribe();
//! assert!(rx.recv_until(&mut lifetime).await.is_none());
//! # Ok(())
//! # }
//! ```

mod bus;
mod error;
mod lifetime;
mod receiver;

pub use bus::{ChannelKind, Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use lifetime::{Lifetime, Unsubscriber};
pub use receiver::EventReceiverExt;
