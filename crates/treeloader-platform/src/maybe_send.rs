//! Conditional `Send`/`Sync` bounds.
//!
//! Native builds run the loader on tokio, where hosts and clients must be
//! `Send + Sync`. In the browser every DOM handle is `!Send`, so on wasm32
//! both traits are blanket-implemented for all types.
//!
//! Only usable as generic bounds: auto-traits are the only traits allowed
//! after `dyn Trait +`.

#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send> MaybeSend for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSend for T {}

#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSync: Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Sync> MaybeSync for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSync {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSync for T {}
