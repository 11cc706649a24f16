// crates/vuln-disclose-core/src/interfaces/mod.rs
// ============================================================================
// Module: Vuln Disclose Interfaces
// Description: Transport-agnostic collaborator contracts for disclosure
// processing.
// Purpose: Define the contract surfaces the state machines call into.
// Dependencies: crate::core, async-trait, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how disclosure processing integrates with email
//! delivery, issue trackers, and private vulnerability reporting channels
//! without embedding provider-specific details. Every
//! method is a potential suspension point and may fail; the core never
//! catches or retries a transport error. Logical non-progress (a send that
//! did not go through, no new responses yet) is expressed in the outcome
//! types, never as an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use thiserror::Error;

use crate::core::AwaitingEmailResponses;
use crate::core::AwaitingIssue;
use crate::core::EmailPhaseFinished;
use crate::core::EmailProcessingState;
use crate::core::EmailResponseFixInvalid;
use crate::core::EmailResponseNotAVulnerability;
use crate::core::EmailSendQueued;
use crate::core::IssueNeeded;
use crate::core::IssuePhaseFinished;
use crate::core::IssueProcessingState;
use crate::core::Repository;

// ============================================================================
// SECTION: Email Source
// ============================================================================

/// Email-source lookup errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum EmailSourceError {
    /// The lookup backend reported an error.
    #[error("email source lookup error: {0}")]
    Lookup(String),
}

/// Resolves which addresses to contact for a repository.
#[async_trait]
pub trait EmailSource: Send + Sync {
    /// Returns the disclosure addresses for `repository`, in preference
    /// order. An empty result means no address could be found and is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`EmailSourceError`] when the lookup backend fails.
    async fn find_disclosure_emails_for_repository(
        &self,
        repository: &Repository,
    ) -> Result<Vec<String>, EmailSourceError>;
}

// ============================================================================
// SECTION: Email Transport
// ============================================================================

/// Email transport errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum EmailTransportError {
    /// The transport reported an error.
    #[error("email transport error: {0}")]
    Transport(String),
}

/// Outcome of a send attempt.
///
/// # Invariants
/// - Variants are exhaustive: a send either went through or stays queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailSendOutcome {
    /// The send did not go through; the state stays queued for the caller's
    /// next invocation.
    Requeued(EmailSendQueued),
    /// The send completed; responses are now awaited.
    Sent(AwaitingEmailResponses),
}

impl From<EmailSendOutcome> for EmailProcessingState {
    fn from(outcome: EmailSendOutcome) -> Self {
        match outcome {
            EmailSendOutcome::Requeued(record) => Self::SendQueued(record),
            EmailSendOutcome::Sent(record) => Self::AwaitingResponses(record),
        }
    }
}

/// End state reported by a response check.
///
/// # Invariants
/// - Variants mirror the end states of [`EmailProcessingState`] exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailEndState {
    /// A maintainer called the fix invalid.
    FixInvalid(EmailResponseFixInvalid),
    /// A maintainer disputed the vulnerability.
    NotAVulnerability(EmailResponseNotAVulnerability),
    /// The phase finished without a substantive response.
    Finished(EmailPhaseFinished),
}

impl From<EmailEndState> for EmailProcessingState {
    fn from(end: EmailEndState) -> Self {
        match end {
            EmailEndState::FixInvalid(record) => Self::FixInvalid(record),
            EmailEndState::NotAVulnerability(record) => Self::NotAVulnerability(record),
            EmailEndState::Finished(record) => Self::Finished(record),
        }
    }
}

/// Outcome of a response check.
///
/// # Invariants
/// - Variants are exhaustive: either nothing new arrived or the phase is
///   concluded by a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailResponseOutcome {
    /// No new responses; the state is unchanged.
    NoNewResponses(AwaitingEmailResponses),
    /// A response concluded the email phase.
    Concluded(EmailEndState),
}

impl From<EmailResponseOutcome> for EmailProcessingState {
    fn from(outcome: EmailResponseOutcome) -> Self {
        match outcome {
            EmailResponseOutcome::NoNewResponses(record) => Self::AwaitingResponses(record),
            EmailResponseOutcome::Concluded(end) => end.into(),
        }
    }
}

/// Sends disclosure notifications and polls for maintainer responses.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Attempts to send the queued notification emails.
    ///
    /// # Errors
    ///
    /// Returns [`EmailTransportError`] when the transport fails; a send that
    /// merely did not go through is [`EmailSendOutcome::Requeued`].
    async fn send_email(
        &self,
        queued: &EmailSendQueued,
    ) -> Result<EmailSendOutcome, EmailTransportError>;

    /// Checks for maintainer responses to a completed send.
    ///
    /// # Errors
    ///
    /// Returns [`EmailTransportError`] when the transport fails; an inbox
    /// with nothing new is [`EmailResponseOutcome::NoNewResponses`].
    async fn check_for_email_responses(
        &self,
        awaiting: &AwaitingEmailResponses,
    ) -> Result<EmailResponseOutcome, EmailTransportError>;
}

// ============================================================================
// SECTION: Issue Transport
// ============================================================================

/// Issue transport errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum IssueTransportError {
    /// The transport reported an error.
    #[error("issue transport error: {0}")]
    Transport(String),
}

/// Outcome of an issue update check.
///
/// # Invariants
/// - Variants are exhaustive: the issue is either still open or the phase
///   finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueUpdateOutcome {
    /// The issue is still open with no concluding activity.
    StillOpen(AwaitingIssue),
    /// Issue activity concluded the phase.
    Finished(IssuePhaseFinished),
}

impl From<IssueUpdateOutcome> for IssueProcessingState {
    fn from(outcome: IssueUpdateOutcome) -> Self {
        match outcome {
            IssueUpdateOutcome::StillOpen(record) => Self::Awaiting(record),
            IssueUpdateOutcome::Finished(record) => Self::Finished(record),
        }
    }
}

/// Creates tracking issues and polls them for maintainer activity.
#[async_trait]
pub trait IssueTransport: Send + Sync {
    /// Attempts to create the tracking issue.
    ///
    /// Returns the next issue sub-state: [`IssueProcessingState::Needed`]
    /// unchanged when creation did not go through,
    /// [`IssueProcessingState::Awaiting`] on success, or
    /// [`IssueProcessingState::Finished`] when the repository does not
    /// support issues.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTransportError`] when the transport fails.
    async fn create_issue(
        &self,
        needed: &IssueNeeded,
    ) -> Result<IssueProcessingState, IssueTransportError>;

    /// Checks an open tracking issue for concluding activity.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTransportError`] when the transport fails; an issue
    /// with no new activity is [`IssueUpdateOutcome::StillOpen`].
    async fn check_for_update(
        &self,
        awaiting: &AwaitingIssue,
    ) -> Result<IssueUpdateOutcome, IssueTransportError>;
}

// ============================================================================
// SECTION: PMPVR Channel
// ============================================================================

/// PMPVR channel errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum PmpvrError {
    /// The channel reported an error.
    #[error("pmpvr channel error: {0}")]
    Channel(String),
}

/// Programmatic means of private vulnerability reporting offered by a
/// hosting provider, used instead of email/issue contact where supported.
#[async_trait]
pub trait PmpvrChannel: Send + Sync {
    /// Returns true when `repository` accepts private vulnerability reports
    /// through this channel.
    ///
    /// # Errors
    ///
    /// Returns [`PmpvrError`] when the channel fails.
    async fn repository_supports_pmpvr(
        &self,
        repository: &Repository,
    ) -> Result<bool, PmpvrError>;
}
