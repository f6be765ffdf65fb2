#![forbid(unsafe_code)]

//! Shared test utilities for the treeloader workspace.
//!
//! [`MockOrigin`] plays both the branch lookup API and the CDN behind one
//! [`TestHttpServer`]. [`FakeBundle`] stands in for a mod's scripts: the
//! [`RecordingExecutor`] interprets a tiny line format and the
//! [`BundleCollaborators`] expose what the executed scripts defined.

pub mod bundle;
pub mod http_server;
pub mod net;
pub mod origin;
pub mod surface;

pub use bundle::{BundleCollaborators, FakeBundle, RecordingExecutor};
pub use http_server::TestHttpServer;
pub use net::CountingNet;
pub use origin::MockOrigin;
pub use surface::{RecordingSurface, SurfaceOp};
