#![forbid(unsafe_code)]

//! Event bus for observing load attempts.

mod bus;
mod event;

pub use bus::EventBus;
pub use event::LoadEvent;
