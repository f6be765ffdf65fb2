use derive_setters::Setters;
use url::Url;

/// Scripts loaded before the entry point in static mode, relative to the
/// script root.
pub const STATIC_BEFORE: &[&str] = &["technical/break_eternity.js", "technical/layerSupport.js"];

/// Scripts loaded after the extensions in static mode, relative to the
/// script root.
pub const STATIC_AFTER: &[&str] = &[
    "technical/temp.js",
    "technical/displays.js",
    "game.js",
    "utils.js",
    "utils/easyAccess.js",
    "technical/systemComponents.js",
    "components.js",
    "technical/canvas.js",
    "technical/particleSystem.js",
    "utils/NumberFormating.js",
    "utils/options.js",
    "utils/save.js",
    "utils/themes.js",
];

/// Where scripts live inside a mod bundle and how its manifest is laid out.
#[derive(Clone, Debug, PartialEq, Eq, Setters)]
#[setters(prefix = "with_", into, strip_option)]
pub struct ManifestOptions {
    /// Document parsed in discovered mode, relative to the pinned base.
    pub index_document: String,
    /// Only script declarations below this prefix are loaded. Also the
    /// directory the static lists are relative to.
    pub script_prefix: String,
    /// Declaration splitting `before` from `after`; never loaded.
    pub sentinel: String,
    /// `id` of the element whose content replaces the host's content region.
    pub content_region: String,
    /// Entry point loaded from the pinned base in static mode.
    pub entry_point: String,
    /// Directory the extension files are relative to.
    pub extension_dir: String,
    pub static_before: Vec<String>,
    pub static_after: Vec<String>,
    /// Root serving the host page's own copy of the static scripts.
    ///
    /// When `None` the static lists are loaded from the pinned base.
    pub local_root: Option<Url>,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            index_document: "index.html".to_string(),
            script_prefix: "js/".to_string(),
            sentinel: "js/technical/loader.js".to_string(),
            content_region: "app".to_string(),
            entry_point: "js/mod.js".to_string(),
            extension_dir: "js/".to_string(),
            static_before: STATIC_BEFORE.iter().map(ToString::to_string).collect(),
            static_after: STATIC_AFTER.iter().map(ToString::to_string).collect(),
            local_root: None,
        }
    }
}
