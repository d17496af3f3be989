use artis_event_bus::{EventBus, EventBusError, EventReceiverExt, Unsubscriber};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
struct NavigationRequested(&'static str);

#[derive(Clone, Debug, PartialEq, Eq)]
struct Snapshot(u32);

#[tokio::test]
async fn broadcast_reaches_every_subscriber_in_order() {
    let bus = EventBus::new();
    let mut first = bus.subscribe::<NavigationRequested>().unwrap();
    let mut second = bus.subscribe::<NavigationRequested>().unwrap();

    assert_eq!(bus.publish(NavigationRequested("/register")).unwrap(), 2);
    bus.publish(NavigationRequested("/validate-mobile")).unwrap();

    for rx in [&mut first, &mut second] {
        assert_eq!(EventReceiverExt::recv(&mut *rx).await.unwrap().0, "/register");
        assert_eq!(EventReceiverExt::recv(&mut *rx).await.unwrap().0, "/validate-mobile");
    }
}

#[tokio::test]
async fn lagged_receiver_recovers() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe_with_capacity::<Snapshot>(2).unwrap();
    for i in 0..10 {
        bus.publish(Snapshot(i)).unwrap();
    }

    let first = EventReceiverExt::recv(&mut rx).await.unwrap();
    assert!(first.0 >= 8, "expected the retained tail, got {}", first.0);
}

#[tokio::test]
async fn watch_subscribers_only_see_new_values() {
    let bus = EventBus::new();
    bus.publish_watch(Snapshot(1)).unwrap();
    let mut rx = bus.subscribe_watch(Snapshot(0)).unwrap();
    assert_eq!(rx.borrow().0, 1, "existing value wins over the seed");

    let pending = tokio::time::timeout(Duration::from_millis(20), EventReceiverExt::recv(&mut rx));
    assert!(pending.await.is_err(), "no change has happened yet");

    bus.publish_watch(Snapshot(2)).unwrap();
    assert_eq!(EventReceiverExt::recv(&mut rx).await.unwrap().0, 2);
}

#[tokio::test]
async fn recv_until_stops_after_unsubscribe() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<Snapshot>().unwrap();
    let owner = Unsubscriber::new();
    let mut lifetime = owner.lifetime();

    bus.publish(Snapshot(1)).unwrap();
    assert_eq!(rx.recv_until(&mut lifetime).await.unwrap().0, 1);

    bus.publish(Snapshot(2)).unwrap();
    owner.unsubscribe();
    assert!(rx.recv_until(&mut lifetime).await.is_none(), "queued event must not leak");
}

#[tokio::test]
async fn recv_until_wakes_on_unsubscribe() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<Snapshot>().unwrap();
    let owner = Unsubscriber::new();
    let mut lifetime = owner.lifetime();

    let task = tokio::spawn(async move { rx.recv_until(&mut lifetime).await });
    tokio::task::yield_now().await;
    owner.unsubscribe();

    let result = tokio::time::timeout(Duration::from_secs(1), task).await.unwrap().unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn shutdown_closes_receivers() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<Snapshot>().unwrap();
    let _watch = bus.subscribe_watch(NavigationRequested("/")).unwrap();

    assert_eq!(bus.shutdown(), 2);
    assert!(EventReceiverExt::recv(&mut rx).await.is_none());
}

#[test]
fn zero_capacity_is_rejected() {
    let bus = EventBus::new();
    let result = bus.subscribe_with_capacity::<Snapshot>(0);
    assert!(matches!(result, Err(EventBusError::InvalidCapacity { .. })));
}
