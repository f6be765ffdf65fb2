//! Configuration for [`LoadOrchestrator`](crate::LoadOrchestrator).

use derive_setters::Setters;
use treeloader_core::ParamDefaults;
use treeloader_manifest::ManifestOptions;
use treeloader_net::NetOptions;

/// Branch lookup API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com/";
/// CDN root serving repositories at a pinned commit.
pub const DEFAULT_CDN_BASE: &str = "https://cdn.jsdelivr.net/gh/";

/// Everything a load attempt needs besides its parameters.
///
/// ```ignore
/// use treeloader::LoaderConfig;
///
/// let config = LoaderConfig::default()
///     .with_cdn_base("https://mirror.example/gh/")
///     .with_event_capacity(256_usize);
/// ```
#[derive(Clone, Debug, Setters)]
#[setters(prefix = "with_", into)]
pub struct LoaderConfig {
    /// Root of the branch lookup API. Must end with `/`.
    pub api_base: String,
    /// Root of the commit-pinned resource CDN. Must end with `/`.
    pub cdn_base: String,
    /// Repository and branch used when the query omits them.
    pub defaults: ParamDefaults,
    /// HTTP client settings (user agent, pooling).
    pub net: NetOptions,
    /// Capacity of the event broadcast channel.
    pub event_capacity: usize,
    /// Layout of mod bundles.
    pub manifest: ManifestOptions,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            defaults: ParamDefaults::default(),
            net: NetOptions::default(),
            event_capacity: 64,
            manifest: ManifestOptions::default(),
        }
    }
}
