// crates/vuln-disclose-core/src/core/repository.rs
// ============================================================================
// Module: Vuln Disclose Repository
// Description: Code hosting location targeted by a disclosure case.
// Purpose: Provide a validated, serializable repository coordinate with a
// deterministic URL form.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`Repository`] names a code hosting location as `{host, owner, name}`.
//! Components are validated as non-empty at construction; the derived URL is
//! deterministic so it can be used in notification content and issue links.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Repository Errors
// ============================================================================

/// Errors raised when constructing a [`Repository`].
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A repository component was empty.
    #[error("repository {component} must be non-empty")]
    EmptyComponent {
        /// Name of the offending component.
        component: &'static str,
    },
}

// ============================================================================
// SECTION: Repository
// ============================================================================

/// Code hosting location for one repository.
///
/// # Invariants
/// - `host`, `owner`, and `name` are non-empty.
/// - `as_url()` is deterministic for equal values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    /// Hosting provider domain, e.g. `github.com`.
    host: String,
    /// Account or organization owning the repository.
    owner: String,
    /// Repository name under the owner.
    name: String,
}

impl Repository {
    /// Creates a new repository coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::EmptyComponent`] when any component is empty.
    pub fn new(
        host: impl Into<String>,
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, RepositoryError> {
        let host = host.into();
        let owner = owner.into();
        let name = name.into();
        if host.is_empty() {
            return Err(RepositoryError::EmptyComponent {
                component: "host",
            });
        }
        if owner.is_empty() {
            return Err(RepositoryError::EmptyComponent {
                component: "owner",
            });
        }
        if name.is_empty() {
            return Err(RepositoryError::EmptyComponent {
                component: "name",
            });
        }
        Ok(Self {
            host,
            owner,
            name,
        })
    }

    /// Returns the hosting provider domain.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the owning account or organization.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the canonical HTTPS URL for the repository.
    #[must_use]
    pub fn as_url(&self) -> String {
        format!("https://{}/{}/{}", self.host, self.owner, self.name)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.name)
    }
}
