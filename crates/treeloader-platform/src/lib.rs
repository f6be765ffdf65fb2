//! Platform-aware primitives for native and wasm32 targets.
//!
//! # Synchronization
//!
//! [`Mutex`] is [`parking_lot::Mutex`] on every target. The browser build
//! runs on the single main thread, so locks are never contended there and the
//! uncontended fast path never parks.
//!
//! # Conditional trait bounds
//!
//! [`MaybeSend`] and [`MaybeSync`] equal `Send`/`Sync` on native and are
//! blanket-implemented on wasm32.
//!
//! # Scheduling
//!
//! [`next_turn`] suspends until the current synchronous phase has finished:
//! a tokio yield on native, a `setTimeout(0)` macrotask in the browser.

#![forbid(unsafe_code)]

mod maybe_send;
mod turn;

pub use maybe_send::{MaybeSend, MaybeSync};
pub use parking_lot::{Mutex, MutexGuard};
pub use turn::next_turn;
