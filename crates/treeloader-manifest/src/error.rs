use thiserror::Error;
use treeloader_net::NetError;
use url::Url;

/// Manifest resolution errors. All of them are fatal for the attempt.
#[derive(Debug, Error, Clone)]
pub enum ManifestError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: Url,
        #[source]
        source: NetError,
    },

    #[error("no script declarations under `{prefix}` found in {url}")]
    NoScripts { url: Url, prefix: String },

    #[error("invalid resource path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },
}

pub type ManifestResult<T> = Result<T, ManifestError>;
