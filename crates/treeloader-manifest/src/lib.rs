#![forbid(unsafe_code)]

//! Script manifest resolution.
//!
//! A [`ScriptManifest`] is the ordered plan of scripts a mod needs:
//! `before ⧺ [entry point] ⧺ extensions ⧺ after`. [`ManifestResolver`]
//! builds it either from the built-in static lists or by discovering the
//! order in the mod's own `index.html`.

pub mod discovered;
mod error;
mod manifest;
mod options;
mod resolver;

pub use discovered::{DiscoveredDocument, parse_document};
pub use error::{ManifestError, ManifestResult};
pub use manifest::{ScriptGroup, ScriptManifest};
pub use options::{ManifestOptions, STATIC_AFTER, STATIC_BEFORE};
pub use resolver::ManifestResolver;
