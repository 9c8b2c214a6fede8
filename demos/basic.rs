//! Basic example demonstrating native-handle usage.
//!
//! A tiny "foreign library" is simulated with heap-allocated counters so the
//! example runs anywhere.
//!
//! Run with: cargo run --example basic

use std::os::raw::{c_char, c_int, c_void};

use native_handle::{FnResource, HandleState, PrintOptions, RawHandle, ReferenceLayout, Wrapped};

#[repr(C)]
struct Counter {
    value: u64,
    references: c_int,
}

unsafe extern "C" fn counter_new(value: u64) -> *mut c_void {
    Box::into_raw(Box::new(Counter {
        value,
        references: 1,
    })) as *mut c_void
}

unsafe extern "C" fn counter_free(handle: *mut c_void) {
    let counter = Box::from_raw(handle as *mut Counter);
    println!("  [lib] freeing counter {} ({} refs)", counter.value, counter.references);
}

unsafe extern "C" fn counter_print(handle: *mut c_void, buf: *mut c_char, len: usize) -> c_int {
    let counter = &*(handle as *const Counter);
    let text = format!("counter(value={}, refs={})", counter.value, counter.references);
    // snprintf contract: at most len - 1 bytes plus a terminator.
    if len > 0 {
        let n = text.len().min(len - 1);
        std::ptr::copy_nonoverlapping(text.as_ptr(), buf as *mut u8, n);
        *buf.add(n) = 0;
    }
    text.len() as c_int
}

unsafe extern "C" fn counter_increment(field: *mut c_int) -> c_int {
    *field += 1;
    *field
}

fn main() {
    let layout = unsafe { ReferenceLayout::new(std::mem::offset_of!(Counter, references)) };
    let kind = FnResource::new("counter", counter_free)
        .with_print(counter_print)
        .with_references(layout, counter_increment);

    println!("--- Owned handle ---");
    let mut a = unsafe { Wrapped::from_raw(kind, RawHandle::from_ptr(counter_new(1)), true) };
    println!("a = {} [{}]", a, a.state());
    a.add_ref();
    println!("a = {} after add_ref", a);

    println!("\n--- Borrowed view ---");
    let view = a.share();
    println!("view = {} [{}]", view, view.state());
    drop(view);

    println!("\n--- Reassignment ---");
    unsafe { a.set_handle(RawHandle::from_ptr(counter_new(2))) };
    println!("a = {} [{}]", a, a.state());
    a.set_owner(true);

    println!("\n--- Dispose ---");
    a.dispose();
    a.dispose();
    println!("a = {} [{}]", a, a.state());
    assert_eq!(a.state(), HandleState::Disposed);

    println!("\n--- Tight buffer ---");
    unsafe { a.set_handle(RawHandle::from_ptr(counter_new(3))) };
    a.set_owner(true);
    let opts = PrintOptions {
        capacity: 8,
        ..Default::default()
    };
    println!("a = {}", a.describe(&opts));

    println!("\n--- End of scope ---");
}
