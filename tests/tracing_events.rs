//! Events emitted under the `tracing` feature.
//!
//! Run with `cargo test --features tracing`. Each test installs a registry
//! with a capturing layer for the duration of the test and checks which
//! `multicast` events fired:
//! - duplicating a shared buffer (`trace`, with the new `len`)
//! - a failing entry (`debug`, with its `index`)
//! - invoking an empty strict list (`error`, right before the panic)
#![cfg(feature = "tracing")]

use std::{
    collections::BTreeMap,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Mutex},
};

use multicast::prelude::*;
use tracing::{Event, Level, Subscriber, field::Field};
use tracing_subscriber::{
    Registry,
    layer::{Context, SubscriberExt},
};

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    target: String,
    fields: BTreeMap<&'static str, String>,
}

impl CapturedEvent {
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }
}

#[derive(Default)]
struct FieldRecorder(BTreeMap<&'static str, String>);

impl tracing::field::Visit for FieldRecorder {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name(), format!("{value:?}"));
    }
}

#[derive(Clone, Default)]
struct CaptureLayer(Arc<Mutex<Vec<CapturedEvent>>>);

impl<S> tracing_subscriber::Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);
        self.0.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_owned(),
            fields: recorder.0,
        });
    }
}

/// Runs `f` with a capturing subscriber and returns the `multicast` events.
fn capture(f: impl FnOnce()) -> Vec<CapturedEvent> {
    let layer = CaptureLayer::default();
    let subscriber = Registry::default().with(layer.clone());
    tracing::subscriber::with_default(subscriber, f);

    let events = layer.0.lock().unwrap();
    events
        .iter()
        .filter(|event| event.target == "multicast")
        .cloned()
        .collect()
}

fn push(value: &u8, log: &mut Vec<u8>) -> Result<usize, u8> {
    log.push(*value);
    Ok(log.len())
}

fn refuse(value: &u8, _: &mut Vec<u8>) -> Result<usize, u8> {
    Err(*value)
}

type Entry = Method<u8, Vec<u8>, usize, u8>;

#[test]
fn duplicating_shared_buffer_emits_trace_event() {
    let events = capture(|| {
        let original: StrictList<Entry> =
            StrictList::from_entries([Method::new(1, push), Method::new(2, push)]);
        let mut copy = original.clone();
        copy.push(Method::new(3, push));
        assert_eq!(original.len(), 2);
    });

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::TRACE);
    assert_eq!(events[0].message(), "duplicated a shared entry buffer");
    assert_eq!(events[0].fields.get("len").map(String::as_str), Some("3"));
}

#[test]
fn in_place_writes_emit_nothing() {
    let events = capture(|| {
        let mut list: StrictList<Entry> = StrictList::from_entry(Method::new(1, push));
        list.push(Method::new(2, push));
        assert_eq!(list.remove(&Method::new(1, push)), 1);
        assert_eq!(list.remove(&Method::new(9, push)), 0);
    });

    assert!(events.is_empty(), "unexpected events: {events:?}");
}

#[test]
fn failing_entry_emits_debug_event() {
    let events = capture(|| {
        let list: StrictList<Entry> = StrictList::from_entries([
            Method::new(1, push),
            Method::new(7, refuse),
            Method::new(3, push),
        ]);
        let mut log = Vec::new();
        assert_eq!(list.invoke(&mut log), Err(7));
        assert_eq!(log, [1]);
    });

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::DEBUG);
    assert_eq!(events[0].message(), "entry failed, skipping the remaining entries");
    assert_eq!(events[0].fields.get("index").map(String::as_str), Some("1"));
}

#[test]
fn empty_strict_invoke_emits_error_before_panicking() {
    let events = capture(|| {
        let list: StrictList<Entry> = StrictList::new();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| list.invoke(&mut Vec::new())));
        assert!(outcome.is_err());
    });

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::ERROR);
    assert_eq!(events[0].message(), "invoked an empty strict multicast list");
}

#[test]
fn empty_permissive_invoke_emits_nothing() {
    let events = capture(|| {
        let list: PermissiveList<Entry> = PermissiveList::new();
        assert_eq!(list.invoke(&mut Vec::new()), Ok(0));
    });

    assert!(events.is_empty(), "unexpected events: {events:?}");
}
