// crates/vuln-disclose-core/src/core/disclosure.rs
// ============================================================================
// Module: Vuln Disclose Processing Step
// Description: Top-level disclosure state and the persisted processing step.
// Purpose: Capture the full state of one disclosure case between orchestrator
// invocations.
// Dependencies: crate::core::{email, identifiers, issue, repository}, serde
// ============================================================================

//! ## Overview
//! A [`DisclosureProcessingStep`] is the persisted state of one disclosure
//! case: the top-level [`DisclosureState`] plus the optional email and issue
//! sub-states. The step is both input and output of a single orchestration
//! call; the external driver owns persistence and rescheduling.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::email::EmailProcessingState;
use crate::core::identifiers::CampaignId;
use crate::core::identifiers::DisclosureId;
use crate::core::issue::IssueProcessingState;
use crate::core::repository::Repository;

// ============================================================================
// SECTION: Disclosure State
// ============================================================================

/// Top-level lifecycle state of a disclosure case.
///
/// # Invariants
/// - Variants are stable for serialization and persisted state.
/// - `Complete*` variants in [`DisclosureState::COMPLETED_STATES`] are
///   terminal: a step carrying one is immutable under further processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisclosureState {
    /// Case created; neither contact flow has started.
    DisclosureQueued,
    /// Email and issue contact are underway; waiting for the maintainer to
    /// enable a private reporting channel.
    AwaitingPmpvrEnable,
    /// Disclosing through the host's private reporting channel.
    DiscloseViaPmpvr,
    /// Disclosing through a public fork.
    DiscloseViaPublicFork,
    /// Disclosing through a public pull request.
    DiscloseViaPublicPullRequest,
    /// Terminal: the repository was archived before disclosure completed.
    CompleteRepositoryArchived,
    /// Terminal: disclosed through the private reporting channel.
    CompleteDisclosedViaPmpvr,
    /// Disclosed through a public fork; kept open for follow-up.
    CompleteDisclosedViaPublicFork,
    /// Terminal: disclosed through a public pull request.
    CompleteDisclosedViaPublicPullRequest,
    /// Terminal: the proposed fix was found invalid.
    CompleteInvalidFix,
}

impl DisclosureState {
    /// Disclosure states under which a step is immutable.
    ///
    /// `CompleteDisclosedViaPublicFork` is deliberately absent: fork-based
    /// disclosures stay open for pull-request follow-up.
    pub const COMPLETED_STATES: [Self; 4] = [
        Self::CompleteRepositoryArchived,
        Self::CompleteDisclosedViaPmpvr,
        Self::CompleteDisclosedViaPublicPullRequest,
        Self::CompleteInvalidFix,
    ];

    /// Returns true when the state is in [`Self::COMPLETED_STATES`].
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(
            self,
            Self::CompleteRepositoryArchived
                | Self::CompleteDisclosedViaPmpvr
                | Self::CompleteDisclosedViaPublicPullRequest
                | Self::CompleteInvalidFix
        )
    }
}

// ============================================================================
// SECTION: Processing Step
// ============================================================================

/// Persisted state of one disclosure case, for a single instance of a
/// vulnerability on a single repository.
///
/// # Invariants
/// - Sub-states, when set, carry this step's `identifier`; the issue
///   sub-state additionally carries this step's `repository`.
/// - Values are immutable; the orchestrator replaces the step wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosureProcessingStep {
    /// Disclosure case identifier.
    pub identifier: DisclosureId,
    /// Campaign this case belongs to.
    pub campaign_identifier: CampaignId,
    /// Repository being disclosed to.
    pub repository: Repository,
    /// Top-level lifecycle state.
    pub disclosure_state: DisclosureState,
    /// Issue-tracking sub-state, filled in lazily by the orchestrator.
    pub issue_processing_state: Option<IssueProcessingState>,
    /// Email-contact sub-state, filled in lazily by the orchestrator.
    pub email_processing_state: Option<EmailProcessingState>,
}

impl DisclosureProcessingStep {
    /// Creates the minimal initial step for a new disclosure case: queued,
    /// with both sub-states unset.
    #[must_use]
    pub const fn minimal_initial(
        identifier: DisclosureId,
        campaign_identifier: CampaignId,
        repository: Repository,
    ) -> Self {
        Self {
            identifier,
            campaign_identifier,
            repository,
            disclosure_state: DisclosureState::DisclosureQueued,
            issue_processing_state: None,
            email_processing_state: None,
        }
    }

    /// Returns true when the top-level state is terminal.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.disclosure_state.is_complete()
    }
}
