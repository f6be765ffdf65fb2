#![forbid(unsafe_code)]

//! Browser entry point: boots the loader page and wires the selector form.

#[cfg(target_arch = "wasm32")]
mod collaborators;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod page;
#[cfg(target_arch = "wasm32")]
mod surface;

// Re-export for wasm-bindgen.
#[cfg(target_arch = "wasm32")]
pub use page::{load_selected_mod, start};
