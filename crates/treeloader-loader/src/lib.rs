#![forbid(unsafe_code)]

//! Ordered script loading.
//!
//! A [`ScriptHost`] turns a URL into a running load and hands back a
//! [`ScriptCompletion`]. Hosts start fetching immediately but execute scripts
//! strictly in the order they were appended. [`ResourceLoader`] builds on that
//! to load whole [`ScriptGroup`](treeloader_manifest::ScriptGroup)s behind a
//! barrier.

mod completion;
#[cfg(not(target_arch = "wasm32"))]
mod fetching;
mod host;
mod loader;

pub use completion::{ScriptCompletion, ScriptError, ScriptResult, ScriptSignal};
#[cfg(not(target_arch = "wasm32"))]
pub use fetching::{FetchingScriptHost, ScriptExecutor};
pub use host::ScriptHost;
pub use loader::ResourceLoader;
