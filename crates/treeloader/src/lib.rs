#![forbid(unsafe_code)]

//! # treeloader
//!
//! Loads a Modding Tree mod straight from its GitHub repository: the branch
//! is pinned to a commit, the mod's scripts are served from a CDN at that
//! commit, and they execute in the order the mod expects.
//!
//! ## Quick start
//!
//! ```ignore
//! use treeloader::prelude::*;
//!
//! let config = LoaderConfig::default();
//! let net = HttpClient::new(&config.net)?;
//! let orchestrator = LoadOrchestrator::new(&config, net, host, collaborators, surface)?;
//!
//! let params = ModParams::from_query_with("?user=foo&mode=full", &config.defaults);
//! match orchestrator.boot(params).await {
//!     LoadState::Ready => {}
//!     other => tracing::warn!(%other, "mod did not start"),
//! }
//! ```

// ── Re-export sub-crates ────────────────────────────────────────────────

pub mod core {
    pub use treeloader_core::*;
}

pub mod events {
    pub use treeloader_events::*;
}

pub mod loader {
    pub use treeloader_loader::*;
}

pub mod manifest {
    pub use treeloader_manifest::*;
}

pub mod net {
    pub use treeloader_net::*;
}

// ── Orchestration ───────────────────────────────────────────────────────

mod collaborators;
mod config;
mod error;
mod orchestrator;
mod recovery;
mod state;
mod surface;
mod version;

pub use collaborators::Collaborators;
pub use config::{DEFAULT_API_BASE, DEFAULT_CDN_BASE, LoaderConfig};
pub use error::{LoadError, LoadResult};
pub use orchestrator::LoadOrchestrator;
pub use recovery::RecoveryPresenter;
pub use state::StateTracker;
pub use surface::{Field, Region, RenderSurface, read_params, write_params};
pub use version::VersionResolver;

// ── Prelude ─────────────────────────────────────────────────────────────

pub mod prelude {
    pub use treeloader_core::{LoadMode, LoadState, ModParams, ReferenceBuilder};
    pub use treeloader_loader::ScriptHost;
    pub use treeloader_net::HttpClient;

    pub use crate::{
        Collaborators, LoadError, LoadOrchestrator, LoaderConfig, RenderSurface,
    };
}
