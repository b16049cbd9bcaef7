//! Behavior tests for multicast lists, exercised through the public API only.
//!
//! Covered here:
//! - copies never observe each other's mutations
//! - entries run in list order, each exactly once
//! - the first failing entry stops the invocation and keeps earlier effects
//! - the last entry's output is the result of a successful invocation
//! - empty lists follow their policy
//! - removal drops every equal entry and keeps the order of the rest
//! - combining lists leaves both inputs alone

use std::{cell::RefCell, rc::Rc};

use derive_more::{Display, Error};
use multicast::prelude::*;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("step {step} refused to run")]
struct StepError {
    step: u8,
}

type Log = Vec<&'static str>;
type Recorder = Method<&'static str, Log, usize, StepError>;

fn record(token: &&'static str, log: &mut Log) -> Result<usize, StepError> {
    log.push(*token);
    Ok(log.len())
}

fn recorder(token: &'static str) -> Recorder {
    Method::new(token, record)
}

type Step = Method<Option<u8>, Vec<u8>, (), StepError>;

fn step(value: &Option<u8>, log: &mut Vec<u8>) -> Result<(), StepError> {
    match *value {
        Some(value) => {
            log.push(value);
            Ok(())
        }
        None => Err(StepError {
            step: u8::try_from(log.len()).unwrap(),
        }),
    }
}

#[test]
fn two_appends_invoke_in_order() {
    let mut list: StrictList<Recorder> = StrictList::new();
    list.push(recorder("1"));
    list.push(recorder("2"));

    let mut log = Vec::new();
    assert_eq!(list.invoke(&mut log), Ok(2));
    assert_eq!(log, ["1", "2"]);
}

#[test]
fn failing_middle_entry_stops_invocation() {
    let list: StrictList<Step> = StrictList::from_entries([
        Method::new(Some(1), step),
        Method::new(None, step),
        Method::new(Some(3), step),
    ]);

    let mut log = Vec::new();
    let error = list.invoke(&mut log).unwrap_err();
    assert_eq!(error, StepError { step: 1 });
    assert_eq!(error.to_string(), "step 1 refused to run");
    assert_eq!(log, [1]);
}

#[test]
fn last_output_wins() {
    let list: StrictList<Recorder> = ["a", "b", "c", "d"].into_iter().map(recorder).collect();

    let mut log = vec!["seed"];
    assert_eq!(list.invoke(&mut log), Ok(5));
}

#[test]
fn entries_called_exactly_once_per_invocation() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let entries: Vec<SharedFn<(), (), StepError>> = (0..4u8)
        .map(|index| {
            let calls = Rc::clone(&calls);
            SharedFn::<(), (), StepError>::new(move |_: &mut ()| {
                calls.borrow_mut().push(index);
                Ok(())
            })
        })
        .collect();

    let list: StrictList<_> = entries.iter().cloned().collect();
    list.invoke(&mut ()).unwrap();
    assert_eq!(*calls.borrow(), [0, 1, 2, 3]);

    list.invoke(&mut ()).unwrap();
    assert_eq!(calls.borrow().len(), 8);
}

#[test]
fn copies_are_isolated() {
    let mut original: StrictList<Recorder> = StrictList::from_entry(recorder("a"));
    let snapshot = original.clone();
    assert!(original.shares_buffer_with(&snapshot));

    original.push(recorder("b"));
    let mut copy = original.clone();
    copy.remove(&recorder("a"));
    copy.push(recorder("c"));
    original.push(recorder("d"));

    assert_eq!(snapshot.entries(), [recorder("a")]);
    assert_eq!(original.entries(), [recorder("a"), recorder("b"), recorder("d")]);
    assert_eq!(copy.entries(), [recorder("b"), recorder("c")]);

    let mut log = Vec::new();
    snapshot.invoke(&mut log).unwrap();
    copy.invoke(&mut log).unwrap();
    assert_eq!(log, ["a", "b", "c"]);
}

#[test]
fn copy_survives_original_being_dropped() {
    let original: StrictList<Recorder> = ["x", "y"].into_iter().map(recorder).collect();
    let mut copy = original.clone();
    drop(original);

    copy.push(recorder("z"));
    let mut log = Vec::new();
    assert_eq!(copy.invoke(&mut log), Ok(3));
    assert_eq!(log, ["x", "y", "z"]);
}

#[test]
#[should_panic(expected = "strict policy")]
fn empty_strict_list_panics() {
    let list: StrictList<Recorder> = StrictList::new();
    let _ = list.invoke(&mut Vec::new());
}

#[test]
#[should_panic(expected = "strict policy")]
fn emptied_strict_list_panics() {
    let mut list: StrictList<Recorder> = StrictList::from_entry(recorder("only"));
    assert_eq!(list.remove(&recorder("only")), 1);
    let _ = list.invoke(&mut Vec::new());
}

#[test]
fn empty_permissive_list_returns_default() {
    let list: PermissiveList<Recorder> = PermissiveList::new();
    let mut log = vec!["untouched"];
    assert_eq!(list.invoke(&mut log), Ok(0));
    assert_eq!(log, ["untouched"]);
}

#[test]
fn remove_drops_every_match_in_order() {
    let mut list: StrictList<Recorder> = ["a", "b", "a", "c", "a"]
        .into_iter()
        .map(recorder)
        .collect();
    assert_eq!(list.remove(&recorder("a")), 3);
    assert_eq!(list.entries(), [recorder("b"), recorder("c")]);

    assert_eq!(list.remove(&recorder("missing")), 0);
    assert_eq!(list.len(), 2);
}

#[test]
fn shared_fn_removed_by_identity() {
    let first: SharedFn<u32, u32, StepError> = SharedFn::new(|value: &mut u32| {
        *value += 1;
        Ok(*value)
    });
    let second: SharedFn<u32, u32, StepError> = SharedFn::new(|value: &mut u32| {
        *value *= 10;
        Ok(*value)
    });

    let mut list: StrictList<_> =
        StrictList::from_entries([first.clone(), second.clone(), first.clone()]);
    let mut value = 1;
    assert_eq!(list.invoke(&mut value), Ok(21));

    assert_eq!(list.remove(&first), 2);
    let mut value = 1;
    assert_eq!(list.invoke(&mut value), Ok(10));
    assert!(list.contains(&second));
}

#[test]
fn combine_keeps_both_inputs() {
    let left: StrictList<Recorder> = ["1", "2"].into_iter().map(recorder).collect();
    let right: PermissiveList<Recorder> = PermissiveList::from_entry(recorder("3"));

    let combined = left.combine(&right);
    assert_eq!(left.len(), 2);
    assert_eq!(right.len(), 1);
    assert!(!combined.shares_buffer_with(&left));

    let mut log = Vec::new();
    assert_eq!(combined.invoke(&mut log), Ok(3));
    assert_eq!(log, ["1", "2", "3"]);
}

#[test]
fn nested_list_failure_propagates() {
    let inner: StrictList<Step> =
        StrictList::from_entries([Method::new(Some(2), step), Method::new(None, step)]);
    let outer: StrictList<StrictList<Step>> = StrictList::from_entries([
        StrictList::from_entry(Method::new(Some(1), step)),
        inner,
        StrictList::from_entry(Method::new(Some(9), step)),
    ]);

    let mut log = Vec::new();
    assert_eq!(outer.invoke(&mut log), Err(StepError { step: 2 }));
    assert_eq!(log, [1, 2]);
}
