// crates/vuln-disclose-core/src/core/identifiers.rs
// ============================================================================
// Module: Vuln Disclose Identifiers
// Description: Canonical opaque identifiers for disclosure cases and campaigns.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the canonical string-based identifiers used throughout
//! Vuln Disclose. Identifiers are opaque and serialize as strings. Validation is
//! handled at intake or persistence boundaries rather than within these simple
//! wrappers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Identifier for a single disclosure case: one vulnerability instance being
/// disclosed to one repository.
///
/// The identifier is used instead of repository URLs throughout processing so
/// a case survives repository renames, deletions, and transfers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisclosureId(String);

impl DisclosureId {
    /// Creates a new disclosure case identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisclosureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for DisclosureId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DisclosureId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Opaque identifier grouping disclosure cases that belong to one campaign,
/// e.g. every repository affected by a single vulnerability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(String);

impl CampaignId {
    /// Creates a new campaign identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for CampaignId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CampaignId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
