//! Navigable references that restart the loader with new parameters.

use url::Url;

use crate::params::{LoadMode, ModParams, query_keys};

/// Encodes a candidate mod into a URL of the loader page.
///
/// Pure: visiting the result is the caller's business.
#[derive(Clone, Debug)]
pub struct ReferenceBuilder {
    location: Url,
}

impl ReferenceBuilder {
    /// `location` is the loader page currently displayed.
    #[must_use]
    pub fn new(location: Url) -> Self {
        Self { location }
    }

    /// Current location with its query replaced by the four parameters.
    #[must_use]
    pub fn build(&self, owner: &str, repository: &str, branch: &str, discovered: bool) -> Url {
        let mut target = self.location.clone();
        target.set_fragment(None);
        target
            .query_pairs_mut()
            .clear()
            .append_pair(query_keys::OWNER, owner)
            .append_pair(query_keys::REPOSITORY, repository)
            .append_pair(query_keys::BRANCH, branch)
            .append_pair(query_keys::MODE, LoadMode::from_flag(discovered).as_param());
        target
    }

    #[must_use]
    pub fn for_params(&self, params: &ModParams) -> Url {
        self.build(
            &params.owner,
            &params.repository,
            &params.branch,
            params.mode.is_discovered(),
        )
    }
}
