#![forbid(unsafe_code)]

//! Core types for treeloader.
//!
//! Everything here is plain data: the parameters an attempt starts from, the
//! validated [`ModReference`], the commit-pinned [`ResolvedVersion`], the
//! [`LoadState`] machine and the [`ReferenceBuilder`] that encodes a new
//! attempt into a navigable URL.

mod errors;
mod link;
mod params;
mod state;
mod version;

pub use errors::{ValidationError, ValidationResult};
pub use link::ReferenceBuilder;
pub use params::{
    DEFAULT_BRANCH, DEFAULT_REPOSITORY, LoadMode, ModParams, ModReference, ParamDefaults,
    query_keys,
};
pub use state::{LoadState, Phase};
pub use version::ResolvedVersion;
