#![cfg(not(feature = "hydrate"))]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn counting_subscriber(notifier: &ChangeNotifier) -> (Arc<AtomicUsize>, Subscription) {
    let count = Arc::new(AtomicUsize::new(0));
    let count_cb = Arc::clone(&count);
    let subscription = notifier.subscribe(move || {
        count_cb.fetch_add(1, Ordering::SeqCst);
    });
    (count, subscription)
}

// =============================================================
// Fan-out
// =============================================================

#[test]
fn publish_reaches_every_subscriber_exactly_once() {
    let notifier = ChangeNotifier::new();
    let (first, _sub_a) = counting_subscriber(&notifier);
    let (second, _sub_b) = counting_subscriber(&notifier);

    notifier.publish();

    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn each_publish_is_independently_observable() {
    let notifier = ChangeNotifier::new();
    let (count, _sub) = counting_subscriber(&notifier);

    notifier.publish();
    notifier.publish();
    notifier.publish();

    assert_eq!(count.load(Ordering::SeqCst), 3);
}

#[test]
fn publish_with_no_subscribers_is_a_noop() {
    let notifier = ChangeNotifier::new();
    notifier.publish();
    assert_eq!(notifier.subscriber_count(), 0);
}

// =============================================================
// Unsubscription
// =============================================================

#[test]
fn cancelled_subscription_stops_delivery() {
    let notifier = ChangeNotifier::new();
    let (count, subscription) = counting_subscriber(&notifier);

    notifier.publish();
    subscription.cancel();
    notifier.publish();

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(notifier.subscriber_count(), 0);
}

#[test]
fn cancel_is_idempotent() {
    let notifier = ChangeNotifier::new();
    let (count, subscription) = counting_subscriber(&notifier);
    let (other, _keep) = counting_subscriber(&notifier);

    subscription.cancel();
    subscription.cancel();
    notifier.publish();

    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(other.load(Ordering::SeqCst), 1);
}

#[test]
fn cancel_only_removes_its_own_subscription() {
    let notifier = ChangeNotifier::new();
    let (first, sub_a) = counting_subscriber(&notifier);
    let (second, _sub_b) = counting_subscriber(&notifier);

    sub_a.cancel();
    notifier.publish();

    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

// =============================================================
// Reentrancy
// =============================================================

#[test]
fn subscribing_during_publish_does_not_deadlock() {
    let notifier = ChangeNotifier::new();
    let inner = ChangeNotifier::clone(&notifier);
    let fired = Arc::new(AtomicUsize::new(0));
    let fired_cb = Arc::clone(&fired);

    let _sub = notifier.subscribe(move || {
        let fired_inner = Arc::clone(&fired_cb);
        // Late subscribers only see later publishes.
        inner
            .subscribe(move || {
                fired_inner.fetch_add(1, Ordering::SeqCst);
            })
            .cancel();
    });

    notifier.publish();
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

// =============================================================
// announce (native path)
// =============================================================

#[test]
fn announce_publishes_outside_the_browser() {
    let notifier = ChangeNotifier::new();
    let (count, _sub) = counting_subscriber(&notifier);

    announce(&notifier);

    assert_eq!(count.load(Ordering::SeqCst), 1);
}
