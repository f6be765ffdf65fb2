use serde::Deserialize;
use tracing::{debug, info};
use treeloader_core::ResolvedVersion;
use treeloader_net::{Headers, Net};
use url::Url;

use crate::error::{LoadError, LoadResult};

const ACCEPT: &str = "application/vnd.github+json";

/// Body of a branch lookup. Failures carry `message` instead of `commit`.
#[derive(Debug, Deserialize)]
struct BranchResponse {
    message: Option<String>,
    commit: Option<BranchCommit>,
}

#[derive(Debug, Deserialize)]
struct BranchCommit {
    sha: Option<String>,
}

/// Pins a branch to its current head commit.
#[derive(Clone, Debug)]
pub struct VersionResolver<N> {
    net: N,
    api_base: Url,
    cdn_base: Url,
}

impl<N: Net> VersionResolver<N> {
    /// Both bases must be able to carry path segments (`http(s)` URLs).
    pub fn new(net: N, api_base: Url, cdn_base: Url) -> LoadResult<Self> {
        for base in [&api_base, &cdn_base] {
            if base.cannot_be_a_base() {
                return Err(LoadError::Config(format!("{base} cannot be a base URL")));
            }
        }
        Ok(Self {
            net,
            api_base,
            cdn_base,
        })
    }

    /// Look up `branch` and derive the commit-pinned resource base.
    ///
    /// A `message` in the response is a failure whatever the status code. A
    /// non-2xx answer without one is a network failure.
    pub async fn resolve(
        &self,
        owner: &str,
        repository: &str,
        branch: &str,
    ) -> LoadResult<ResolvedVersion> {
        let url = self.lookup_url(owner, repository, branch)?;
        debug!(%url, "looking up branch");

        let headers = Headers::new().with("Accept", ACCEPT);
        let body = match self.net.get_bytes(url, Some(headers)).await {
            Ok(body) => body,
            Err(error) => {
                return Err(match error.body().and_then(failure_message) {
                    Some(message) => LoadError::ReferenceResolution { message },
                    None => LoadError::Network(error),
                });
            }
        };

        let response: BranchResponse = serde_json::from_slice(&body).map_err(|error| {
            LoadError::reference(format!("malformed branch lookup response: {error}"))
        })?;
        if let Some(message) = response.message {
            return Err(LoadError::ReferenceResolution { message });
        }
        let Some(sha) = response.commit.and_then(|commit| commit.sha) else {
            return Err(LoadError::reference(
                "malformed branch lookup response: no commit",
            ));
        };

        let base_url = self.base_url(owner, repository, &sha)?;
        info!(commit = %sha, base = %base_url, "version resolved");
        Ok(ResolvedVersion::new(sha, base_url))
    }

    fn lookup_url(&self, owner: &str, repository: &str, branch: &str) -> LoadResult<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| LoadError::Config(format!("{} cannot be a base URL", self.api_base)))?
            .pop_if_empty()
            .extend(["repos", owner, repository, "branches", branch]);
        Ok(url)
    }

    fn base_url(&self, owner: &str, repository: &str, sha: &str) -> LoadResult<Url> {
        let mut url = self.cdn_base.clone();
        url.path_segments_mut()
            .map_err(|()| LoadError::Config(format!("{} cannot be a base URL", self.cdn_base)))?
            .pop_if_empty()
            .push(owner)
            .push(&format!("{repository}@{sha}"))
            .push("");
        Ok(url)
    }
}

fn failure_message(body: &str) -> Option<String> {
    serde_json::from_str::<BranchResponse>(body)
        .ok()
        .and_then(|response| response.message)
}
