//! Ownership and disposal tests.

mod common;

use std::sync::{Arc, Mutex};
use std::thread;

use common::Recorder;
use native_handle::{HandleState, RawHandle};

#[test]
fn test_owned_dispose_releases_once() {
    let rec = Recorder::new();
    let mut w = rec.wrap(0x1000, true);

    w.dispose();

    assert_eq!(rec.releases(), vec![0x1000], "owned handle should be released");
    assert!(!w.handle().is_valid(), "handle should be zero after dispose");
    assert!(w.is_disposed(), "wrapper should be disposed");
}

#[test]
fn test_borrowed_dispose_never_releases() {
    let rec = Recorder::new();
    let mut w = rec.wrap(0x1000, false);

    w.dispose();
    w.dispose();
    drop(w);

    assert!(rec.releases().is_empty(), "borrowed handle must not be released");
}

#[test]
fn test_reassign_releases_previous() {
    let rec = Recorder::new();
    let mut w = rec.wrap(0x1000, true);

    unsafe { w.set_handle(RawHandle::from(0x2000)) };

    assert_eq!(rec.releases(), vec![0x1000]);
    assert_eq!(w.handle().addr(), 0x2000);
    assert!(!w.is_owner(), "assignment must not imply ownership");
}

#[test]
fn test_reassign_borrowed_keeps_previous() {
    let rec = Recorder::new();
    let mut w = rec.wrap(0x1000, false);

    unsafe { w.set_handle(RawHandle::from(0x2000)) };
    w.set_owner(true);
    drop(w);

    assert_eq!(rec.releases(), vec![0x2000]);
    assert_eq!(rec.adoptions(), vec![0x2000]);
}

#[test]
fn test_repeated_dispose_is_noop() {
    let rec = Recorder::new();
    let mut w = rec.wrap(0x1000, true);

    for _ in 0..5 {
        w.dispose();
        assert!(!w.handle().is_valid());
    }
    drop(w);

    assert_eq!(rec.releases().len(), 1);
}

#[test]
fn test_set_owner_after_borrowed_dispose() {
    let rec = Recorder::new();
    let mut w = rec.wrap(0x1000, false);

    w.dispose();
    w.set_owner(true);
    w.dispose();

    assert!(rec.releases().is_empty(), "dispose only runs once per assignment");
}

#[test]
fn test_reassign_after_borrowed_dispose_releases_once() {
    let rec = Recorder::new();
    let mut w = rec.wrap(0x1000, false);

    w.dispose();
    w.set_owner(true);
    unsafe { w.set_handle(RawHandle::from(0x2000)) };

    assert_eq!(rec.releases(), vec![0x1000], "owned address is released on reassignment");
    assert!(!w.is_owner());
    assert_eq!(w.state(), HandleState::Borrowed);

    drop(w);
    assert_eq!(rec.releases(), vec![0x1000], "drop must not release anything else");
}

#[test]
fn test_rearm_after_dispose() {
    let rec = Recorder::new();
    let mut w = rec.wrap(0x1000, true);
    w.dispose();
    assert_eq!(w.state(), HandleState::Disposed);

    unsafe { w.set_handle(RawHandle::from(0x2000)) };
    assert_eq!(w.state(), HandleState::Borrowed);
    assert!(w.is_sweep_armed());

    w.set_owner(true);
    assert_eq!(w.state(), HandleState::Owned);
    w.dispose();
    w.dispose();

    assert_eq!(rec.releases(), vec![0x1000, 0x2000]);
}

#[test]
fn test_drop_is_fallback_release() {
    let rec = Recorder::new();
    {
        let _owned = rec.wrap(0x1000, true);
        let _borrowed = rec.wrap(0x1000, false);
        let _empty = rec.wrap(0, true);
    }
    assert_eq!(rec.releases(), vec![0x1000]);
}

#[test]
fn test_drop_swallows_release_panic() {
    let mut rec = Recorder::new();
    rec.panic_on_release = true;

    let w = rec.wrap(0x1000, true);
    drop(w);

    assert_eq!(rec.releases(), vec![0x1000]);
}

#[test]
fn test_panicking_dispose_is_not_retried() {
    let mut rec = Recorder::new();
    rec.panic_on_release = true;

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut w = rec.wrap(0x1000, true);
        w.dispose();
    }));

    assert!(result.is_err(), "explicit dispose propagates the defect");
    assert_eq!(rec.releases(), vec![0x1000], "drop must not release again");
}

#[test]
fn test_transfer_between_wrappers() {
    let rec = Recorder::new();
    let mut a = rec.wrap(0x1000, true);
    let mut b = rec.wrap(0, false);

    let raw = a.take();
    unsafe { b.set_handle(raw) };
    b.set_owner(true);

    drop(a);
    assert!(rec.releases().is_empty());
    drop(b);
    assert_eq!(rec.releases(), vec![0x1000]);
}

#[test]
fn test_into_raw_relinquishes() {
    let rec = Recorder::new();
    let w = rec.wrap(0x1000, true);
    let raw = w.into_raw();

    assert_eq!(raw.addr(), 0x1000);
    assert!(rec.releases().is_empty());
}

#[test]
fn test_shared_wrappers_release_once() {
    let rec = Recorder::new();
    let owner = rec.wrap(0x1000, true);
    let views: Vec<_> = (0..4).map(|_| owner.share()).collect();

    drop(views);
    assert!(rec.releases().is_empty());
    drop(owner);
    assert_eq!(rec.releases(), vec![0x1000]);
}

#[test]
fn test_concurrent_dispose_behind_lock() {
    let rec = Recorder::new();
    let w = Arc::new(Mutex::new(rec.wrap(0x1000, true)));

    let threads: Vec<_> = (0..8)
        .map(|_| {
            let w = Arc::clone(&w);
            thread::spawn(move || {
                w.lock().unwrap().dispose();
            })
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }

    assert_eq!(rec.releases(), vec![0x1000]);
    assert_eq!(w.lock().unwrap().state(), HandleState::Disposed);
}
