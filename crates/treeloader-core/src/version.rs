use url::Url;

/// A branch pinned to a commit, plus the resource root derived from it.
///
/// Everything loaded below `base_url` is immutable for the lifetime of the
/// commit, so two loads of the same reference are byte-identical.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedVersion {
    commit_id: String,
    base_url: Url,
}

impl ResolvedVersion {
    /// `base_url` must end with `/` so relative paths join below it.
    #[must_use]
    pub fn new(commit_id: impl Into<String>, base_url: Url) -> Self {
        Self {
            commit_id: commit_id.into(),
            base_url,
        }
    }

    #[must_use]
    pub fn commit_id(&self) -> &str {
        &self.commit_id
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
