use thiserror::Error;
use treeloader_core::ValidationError;
use treeloader_loader::ScriptError;
use treeloader_manifest::ManifestError;
use treeloader_net::NetError;

pub type LoadResult<T> = Result<T, LoadError>;

/// Why a load attempt failed.
///
/// The `Display` text is what the error region shows.
#[derive(Debug, Error, Clone)]
pub enum LoadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    ReferenceResolution { message: String },

    #[error("network error: {0}")]
    Network(#[from] NetError),

    #[error("could not read the mod's script list: {0}")]
    ManifestParse(#[from] ManifestError),

    #[error("{url} failed to load")]
    ResourceLoad { url: String },

    #[error("could not start the mod: {0}")]
    Startup(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl LoadError {
    pub fn reference(message: impl Into<String>) -> Self {
        Self::ReferenceResolution {
            message: message.into(),
        }
    }
}

impl From<ScriptError> for LoadError {
    fn from(error: ScriptError) -> Self {
        Self::ResourceLoad {
            url: error.resource(),
        }
    }
}
