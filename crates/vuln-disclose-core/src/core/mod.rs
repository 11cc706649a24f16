// crates/vuln-disclose-core/src/core/mod.rs
// ============================================================================
// Module: Vuln Disclose Core Types
// Description: Canonical disclosure-case data model and deadline policy.
// Purpose: Provide stable, serializable types for disclosure processing state.
// Dependencies: serde, thiserror, time
// ============================================================================

//! ## Overview
//! Core types define the disclosure processing step, its email and issue
//! sub-state families, and the deadline policy. These types are the canonical
//! source of truth for any persistence layout or API surface an external
//! driver builds on top of them.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod disclosure;
pub mod email;
pub mod identifiers;
pub mod issue;
pub mod repository;
pub mod timeline;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use disclosure::DisclosureProcessingStep;
pub use disclosure::DisclosureState;
pub use email::AwaitingEmailResponses;
pub use email::EmailPhaseFinished;
pub use email::EmailPhaseFinishedReason;
pub use email::EmailProcessingState;
pub use email::EmailResponseFixInvalid;
pub use email::EmailResponseNotAVulnerability;
pub use email::EmailSendQueued;
pub use email::SentEmails;
pub use identifiers::CampaignId;
pub use identifiers::DisclosureId;
pub use issue::AwaitingIssue;
pub use issue::Issue;
pub use issue::IssueNeeded;
pub use issue::IssuePhaseFinished;
pub use issue::IssuePhaseFinishedReason;
pub use issue::IssueProcessingState;
pub use repository::Repository;
pub use repository::RepositoryError;
pub use timeline::Clock;
pub use timeline::DisclosureDeadlines;
pub use timeline::EMAIL_DISCLOSURE_DEADLINE_DAYS;
pub use timeline::FixedClock;
pub use timeline::ISSUE_PMPVR_REQUEST_DEADLINE_DAYS;
pub use timeline::SystemClock;
