#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn new_handle_is_not_aborted() {
    assert!(!AbortHandle::new().is_aborted());
}

#[test]
fn replace_aborts_previous_handle() {
    let mut slot = InFlight::default();
    let first = slot.replace();
    let second = slot.replace();
    assert!(first.is_aborted());
    assert!(!second.is_aborted());
}

#[test]
fn cancel_aborts_and_empties_slot() {
    let mut slot = InFlight::default();
    let handle = slot.replace();
    assert!(!slot.is_idle());
    slot.cancel();
    assert!(handle.is_aborted());
    assert!(slot.is_idle());
}

#[test]
fn cancel_on_empty_slot_is_noop() {
    let mut slot = InFlight::default();
    slot.cancel();
    assert!(slot.is_idle());
}

#[test]
fn dropping_slot_aborts_outstanding_handle() {
    let mut slot = InFlight::default();
    let handle = slot.replace();
    drop(slot);
    assert!(handle.is_aborted());
}
