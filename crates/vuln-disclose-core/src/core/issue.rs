// crates/vuln-disclose-core/src/core/issue.rs
// ============================================================================
// Module: Vuln Disclose Issue Processing States
// Description: Issue-tracking sub-states for a disclosure case.
// Purpose: Capture the tracking-issue phase of a disclosure as a closed,
// serializable state family.
// Dependencies: crate::core::{identifiers, repository}, serde, time
// ============================================================================

//! ## Overview
//! The issue-tracking phase of a disclosure case is modeled as a closed sum
//! type: issue needed, issue open and awaited, or finished. Records carry both
//! the parent case identifier and the repository, so an issue that is deleted,
//! moved, or converted to a discussion can still be traced to its case.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::core::identifiers::DisclosureId;
use crate::core::repository::Repository;

// ============================================================================
// SECTION: Issue Record
// ============================================================================

/// An issue that has actually been created on a repository.
///
/// Not a state by itself; embedded in the states that follow a creation.
///
/// # Invariants
/// - `creation_date` carries an explicit offset; offset-less RFC 3339 strings
///   are rejected at deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Timestamp the issue was created.
    #[serde(with = "time::serde::rfc3339")]
    pub creation_date: OffsetDateTime,
    /// Host-side identifier of the issue.
    pub issue_identifier: String,
    /// URL of the issue at creation time.
    pub issue_url: String,
}

// ============================================================================
// SECTION: Issue Phase Records
// ============================================================================

/// A tracking issue is needed but has not been created yet.
///
/// # Invariants
/// - `identifier` and `repository` equal the parent step's values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueNeeded {
    /// Parent disclosure case identifier.
    pub identifier: DisclosureId,
    /// Repository the issue will be opened on.
    pub repository: Repository,
}

/// A tracking issue exists; maintainer activity is awaited.
///
/// # Invariants
/// - `identifier` and `repository` equal the parent step's values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwaitingIssue {
    /// Parent disclosure case identifier.
    pub identifier: DisclosureId,
    /// Repository the issue was opened on.
    pub repository: Repository,
    /// The created issue.
    pub issue: Issue,
}

/// Reason the issue phase finished.
///
/// # Invariants
/// - Variants are stable for serialization and persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuePhaseFinishedReason {
    /// The 35-day PMPVR request deadline elapsed.
    ThirtyFiveDaysPassed,
    /// The issue was closed without a maintainer response.
    IssueClosedNoResponse,
    /// The issue was closed by stale-issue automation.
    IssueClosedByStaleAutomation,
    /// The repository does not support issues.
    IssuesUnsupported,
}

/// The issue phase is over; no further issue processing occurs.
///
/// # Invariants
/// - `identifier` and `repository` equal the parent step's values.
/// - `issue` is `None` only when no issue was ever created
///   ([`IssuePhaseFinishedReason::IssuesUnsupported`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuePhaseFinished {
    /// Parent disclosure case identifier.
    pub identifier: DisclosureId,
    /// Repository the phase ran against.
    pub repository: Repository,
    /// Why the phase finished.
    pub completed_reason: IssuePhaseFinishedReason,
    /// The created issue, when one existed.
    pub issue: Option<Issue>,
}

// ============================================================================
// SECTION: Issue Processing State
// ============================================================================

/// Issue-tracking sub-state of a disclosure case.
///
/// # Invariants
/// - Variants are stable for serialization and persisted state.
/// - [`IssueProcessingState::Finished`] is the single end state: processing
///   returns it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum IssueProcessingState {
    /// An issue is needed, pending creation.
    Needed(IssueNeeded),
    /// An issue exists; updates are awaited.
    Awaiting(AwaitingIssue),
    /// End state: the phase finished.
    Finished(IssuePhaseFinished),
}

impl IssueProcessingState {
    /// Returns the parent case identifier carried by this sub-state.
    #[must_use]
    pub const fn identifier(&self) -> &DisclosureId {
        match self {
            Self::Needed(record) => &record.identifier,
            Self::Awaiting(record) => &record.identifier,
            Self::Finished(record) => &record.identifier,
        }
    }

    /// Returns the repository carried by this sub-state.
    #[must_use]
    pub const fn repository(&self) -> &Repository {
        match self {
            Self::Needed(record) => &record.repository,
            Self::Awaiting(record) => &record.repository,
            Self::Finished(record) => &record.repository,
        }
    }

    /// Returns true when no further issue processing will occur.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}
