//! Attempt parameters and the validated mod reference.

use std::fmt;

use url::form_urlencoded;

use crate::errors::{ValidationError, ValidationResult};

/// Repository loaded when the query does not name one.
pub const DEFAULT_REPOSITORY: &str = "The-Modding-Tree";
/// Branch loaded when the query does not name one.
pub const DEFAULT_BRANCH: &str = "master";

/// Query-string keys understood by the loader page.
pub mod query_keys {
    pub const OWNER: &str = "user";
    pub const REPOSITORY: &str = "repo";
    pub const BRANCH: &str = "branch";
    pub const MODE: &str = "mode";
}

const MODE_DISCOVERED: &str = "full";
const MODE_STATIC: &str = "light";

/// How the script manifest of a mod is determined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LoadMode {
    /// Fixed, built-in script order around the mod's entry point.
    #[default]
    Static,
    /// Script order discovered from the mod's own `index.html`.
    Discovered,
}

impl LoadMode {
    /// `full` selects [`LoadMode::Discovered`]; anything else is static.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(MODE_DISCOVERED) => Self::Discovered,
            _ => Self::Static,
        }
    }

    #[must_use]
    pub fn from_flag(discovered: bool) -> Self {
        if discovered {
            Self::Discovered
        } else {
            Self::Static
        }
    }

    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Static => MODE_STATIC,
            Self::Discovered => MODE_DISCOVERED,
        }
    }

    #[must_use]
    pub fn is_discovered(self) -> bool {
        matches!(self, Self::Discovered)
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => f.write_str("static"),
            Self::Discovered => f.write_str("discovered"),
        }
    }
}

/// Fallback values for optional parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamDefaults {
    pub repository: String,
    pub branch: String,
}

impl Default for ParamDefaults {
    fn default() -> Self {
        Self {
            repository: DEFAULT_REPOSITORY.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

/// The parameters of one attempt, defaults applied but not yet validated.
///
/// This is also what the recovery surface writes back into the selector, so
/// an empty `owner` is representable here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModParams {
    pub owner: String,
    pub repository: String,
    pub branch: String,
    pub mode: LoadMode,
}

impl ModParams {
    /// Parse a query string (with or without the leading `?`).
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        Self::from_query_with(query, &ParamDefaults::default())
    }

    /// Parse a query string using custom defaults.
    ///
    /// Empty values count as absent. The owner is trimmed, so a blank owner is
    /// absent too. When a key repeats, the first value wins.
    #[must_use]
    pub fn from_query_with(query: &str, defaults: &ParamDefaults) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut owner = None;
        let mut repository = None;
        let mut branch = None;
        let mut mode = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let (slot, value) = match &*key {
                query_keys::OWNER => (&mut owner, value.trim()),
                query_keys::REPOSITORY => (&mut repository, &*value),
                query_keys::BRANCH => (&mut branch, &*value),
                query_keys::MODE => (&mut mode, &*value),
                _ => continue,
            };
            if slot.is_none() && !value.is_empty() {
                *slot = Some(value.to_string());
            }
        }

        Self {
            owner: owner.unwrap_or_default(),
            repository: repository.unwrap_or_else(|| defaults.repository.clone()),
            branch: branch.unwrap_or_else(|| defaults.branch.clone()),
            mode: LoadMode::from_param(mode.as_deref()),
        }
    }

    /// Validate into a [`ModReference`].
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingOwner`] when no owner was supplied. An owner
    /// typed into the selector is trimmed here the same way a queried one is.
    pub fn into_reference(self) -> ValidationResult<ModReference> {
        let owner = self.owner.trim();
        if owner.is_empty() {
            return Err(ValidationError::MissingOwner);
        }
        Ok(ModReference {
            owner: owner.to_string(),
            repository: self.repository,
            branch: self.branch,
            mode: self.mode,
        })
    }
}

/// A validated (owner, repository, branch, mode) tuple.
///
/// Immutable once built; obtain one through [`ModParams::into_reference`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModReference {
    owner: String,
    repository: String,
    branch: String,
    mode: LoadMode,
}

impl ModReference {
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    #[must_use]
    pub fn mode(&self) -> LoadMode {
        self.mode
    }
}

impl From<&ModReference> for ModParams {
    fn from(reference: &ModReference) -> Self {
        Self {
            owner: reference.owner.clone(),
            repository: reference.repository.clone(),
            branch: reference.branch.clone(),
            mode: reference.mode,
        }
    }
}

impl fmt::Display for ModReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}@{} ({})",
            self.owner, self.repository, self.branch, self.mode
        )
    }
}
